//! Reflection family: index introspection

use crate::client::{forward, CallMetadata, SummaClient};
use crate::error::ClientResult;
use crate::proto::{GetTopTermsRequest, GetTopTermsResponse};

impl SummaClient {
    /// Top-`top_k` most frequent terms of `field_name`, per segment
    pub async fn get_top_terms(
        &self,
        index_name: impl Into<String>,
        field_name: impl Into<String>,
        top_k: u32,
        meta: CallMetadata,
    ) -> ClientResult<GetTopTermsResponse> {
        let request = meta.request(GetTopTermsRequest {
            index_name: index_name.into(),
            field_name: field_name.into(),
            top_k,
        })?;
        let mut client = self.handles().reflection_api();
        forward("get_top_terms", &meta, client.get_top_terms(request)).await
    }
}
