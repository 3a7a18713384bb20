//! Search family

use crate::client::{forward, CallMetadata, SummaClient};
use crate::error::ClientResult;
use crate::input::Collectors;
use crate::proto::{Query, SearchRequest, SearchResponse};

impl SummaClient {
    /// Run `query` against the index behind `index_alias`
    ///
    /// `collectors` may be a single collector or a list; each collector
    /// yields one entry of `collector_outputs`, in the same order.
    ///
    /// # Errors
    ///
    /// Fails locally with `InvalidArgument` if no collector is given or a
    /// collector has no variant set.
    pub async fn search(
        &self,
        index_alias: impl Into<String>,
        query: Query,
        collectors: impl Into<Collectors>,
        meta: CallMetadata,
    ) -> ClientResult<SearchResponse> {
        let request = meta.request(SearchRequest {
            index_alias: index_alias.into(),
            query: Some(query),
            collectors: collectors.into().into_vec()?,
        })?;
        let mut client = self.handles().search_api();
        forward("search", &meta, client.search(request)).await
    }
}
