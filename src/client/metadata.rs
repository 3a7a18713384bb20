//! Call-scoped correlation identifiers
//!
//! Both identifiers travel as gRPC metadata (`request-id`, `session-id`),
//! never inside the request message.

use tonic::metadata::{AsciiMetadataValue, MetadataMap};
use tonic::Request;

use crate::error::{ClientError, ClientResult};

/// Metadata key carrying the request id
pub const REQUEST_ID_KEY: &str = "request-id";

/// Metadata key carrying the session id
pub const SESSION_ID_KEY: &str = "session-id";

/// Optional identifiers attached to a single call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallMetadata {
    pub request_id: Option<String>,
    pub session_id: Option<String>,
}

impl CallMetadata {
    /// No identifiers
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Wrap `message` into a request carrying the set identifiers
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if an identifier is not a valid ASCII
    /// metadata value.
    pub fn request<T>(&self, message: T) -> ClientResult<Request<T>> {
        let mut request = Request::new(message);
        self.apply(request.metadata_mut())?;
        Ok(request)
    }

    fn apply(&self, metadata: &mut MetadataMap) -> ClientResult<()> {
        for (key, value) in [
            (REQUEST_ID_KEY, &self.request_id),
            (SESSION_ID_KEY, &self.session_id),
        ] {
            if let Some(value) = value {
                let value = AsciiMetadataValue::try_from(value.as_str()).map_err(|_| {
                    ClientError::invalid_argument(format!("{key} is not valid metadata: {value:?}"))
                })?;
                metadata.insert(key, value);
            }
        }
        Ok(())
    }
}
