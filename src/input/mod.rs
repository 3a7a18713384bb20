//! Input normalization
//!
//! The few arguments whose shape is ambiguous are normalized here, before a
//! request is built. Everything in this module fails with a local error and
//! never touches the network.

pub mod collectors;
pub mod document;
pub mod encoding;
pub mod schema;

pub use collectors::Collectors;
pub use document::Document;
