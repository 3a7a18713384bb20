//! summa-client library exports
//!
//! Async gRPC client for the summa search server. See [`SummaClient`].

pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod proto;

// Re-exports
pub use client::{
    CallMetadata, CreateConsumerParams, CreateIndexParams, ServiceHandles, SummaClient,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use input::{Collectors, Document};
pub use proto::{Compression, Order};
