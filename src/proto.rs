//! Generated summa protobuf messages and service stubs
//!
//! Compiled from `proto/*.proto` by the build script. Every service shares
//! the `summa.proto` package, so all messages land in this one module.

#![allow(clippy::all)]
#![allow(clippy::pedantic)]

tonic::include_proto!("summa.proto");

pub use consumer_api_client::ConsumerApiClient;
pub use index_api_client::IndexApiClient;
pub use reflection_api_client::ReflectionApiClient;
pub use search_api_client::SearchApiClient;
