//! gRPC client for the summa search server
//!
//! Every operation has the same shape: normalize the arguments, build the
//! request message, attach [`CallMetadata`], forward it to the stub of its
//! operation family and hand back the response. Failures come back as
//! produced by the channel or the server; nothing is retried.
//!
//! Operations are grouped by family:
//! - index: commit, create, delete, get, aliases, documents, segments
//! - consumer: create, get, delete
//! - search: search
//! - reflection: top terms

mod consumer;
mod handles;
mod index;
mod metadata;
mod reflection;
mod search;

pub use handles::ServiceHandles;
pub use index::CreateIndexParams;
pub use consumer::CreateConsumerParams;
pub use metadata::{CallMetadata, REQUEST_ID_KEY, SESSION_ID_KEY};

use std::future::Future;

use tonic::transport::Channel;
use tonic::{Response, Status};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Client for the summa gRPC API
///
/// Cheap to clone. Any number of calls may be in flight at once.
#[derive(Debug, Clone)]
pub struct SummaClient {
    handles: ServiceHandles,
}

impl SummaClient {
    /// Create a client over already connected service handles
    pub fn new(handles: ServiceHandles) -> Self {
        Self { handles }
    }

    /// Create a client sharing one channel across all operation families
    pub fn from_channel(channel: Channel) -> Self {
        Self::new(ServiceHandles::from_channel(channel))
    }

    /// Dial the configured endpoint and create a client
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint URL is invalid
    /// - The server cannot be reached
    pub async fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let channel = config.endpoint()?.connect().await?;
        info!(endpoint = %config.endpoint, "Connected to summa");
        Ok(Self::with_config(channel, config))
    }

    /// Create a client whose channel dials on first use
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL is invalid.
    pub fn connect_lazy(config: &ClientConfig) -> ClientResult<Self> {
        let channel = config.endpoint()?.connect_lazy();
        debug!(endpoint = %config.endpoint, "Created lazy summa channel");
        Ok(Self::with_config(channel, config))
    }

    fn with_config(channel: Channel, config: &ClientConfig) -> Self {
        let handles = ServiceHandles::from_channel(channel);
        match config.max_message_bytes {
            Some(limit) => Self::new(handles.with_max_message_size(limit)),
            None => Self::new(handles),
        }
    }

    /// The per-family stubs this client forwards to
    pub fn handles(&self) -> &ServiceHandles {
        &self.handles
    }
}

/// Await a stub call and unwrap its response
///
/// The status of a failed call is returned untouched.
pub(crate) async fn forward<T, F>(method: &'static str, meta: &CallMetadata, call: F) -> ClientResult<T>
where
    F: Future<Output = Result<Response<T>, Status>>,
{
    debug!(
        method,
        request_id = meta.request_id.as_deref(),
        session_id = meta.session_id.as_deref(),
        "Forwarding summa call"
    );

    match call.await {
        Ok(response) => Ok(response.into_inner()),
        Err(status) => {
            debug!(
                method,
                code = ?status.code(),
                status_message = status.message(),
                request_id = meta.request_id.as_deref(),
                "summa call failed"
            );
            Err(status.into())
        }
    }
}
