//! Client error types

use std::path::PathBuf;

use thiserror::Error;

/// Main client error type
///
/// Remote failures are carried as-is: the `tonic::Status` a call returned
/// (or the transport error raised while dialing) is never rewritten or
/// retried. Only [`ClientError::InvalidArgument`] and
/// [`ClientError::SchemaFile`] originate locally, and both are raised before
/// any request leaves the process.
#[derive(Debug, Error)]
pub enum ClientError {
    // ========== Remote Errors ==========
    /// Failure reported by the server or by the channel during a call
    #[error("rpc failed: {0}")]
    Status(#[from] tonic::Status),

    /// Failure while establishing the channel
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    // ========== Local Errors ==========
    /// Endpoint URI could not be parsed
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Argument rejected during input normalization
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Schema argument names a file that could not be read
    #[error("failed to read schema file {}: {source}", path.display())]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        ClientError::InvalidArgument(message.into())
    }

    /// gRPC status code of a remote failure, if this is one
    pub fn code(&self) -> Option<tonic::Code> {
        match self {
            ClientError::Status(status) => Some(status.code()),
            _ => None,
        }
    }

    /// Remote status, if this error came back from a call
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            ClientError::Status(status) => Some(status),
            _ => None,
        }
    }

    /// True when the call was rejected locally before reaching the network
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidArgument(_) | ClientError::SchemaFile { .. }
        )
    }
}
