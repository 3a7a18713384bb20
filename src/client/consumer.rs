//! Consumer family: message-queue ingestion into an index

use crate::client::{forward, CallMetadata, SummaClient};
use crate::error::ClientResult;
use crate::proto::*;

/// Arguments of [`SummaClient::create_consumer`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateConsumerParams {
    pub index_name: String,
    /// Also used to name the consumer's topics on the queue side
    pub consumer_name: String,
    pub bootstrap_servers: Vec<String>,
    pub group_id: String,
    pub topics: Vec<String>,
    /// Reader threads, also the partition count of created topics
    pub threads: Option<u32>,
}

impl CreateConsumerParams {
    pub fn new<B, T>(
        index_name: impl Into<String>,
        consumer_name: impl Into<String>,
        bootstrap_servers: B,
        group_id: impl Into<String>,
        topics: T,
    ) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            index_name: index_name.into(),
            consumer_name: consumer_name.into(),
            bootstrap_servers: bootstrap_servers.into_iter().map(Into::into).collect(),
            group_id: group_id.into(),
            topics: topics.into_iter().map(Into::into).collect(),
            threads: None,
        }
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }
}

impl From<CreateConsumerParams> for CreateConsumerRequest {
    fn from(params: CreateConsumerParams) -> Self {
        CreateConsumerRequest {
            bootstrap_servers: params.bootstrap_servers,
            group_id: params.group_id,
            index_name: params.index_name,
            consumer_name: params.consumer_name,
            topics: params.topics,
            threads: params.threads,
        }
    }
}

impl SummaClient {
    /// Create a consumer and its topics; it starts consuming immediately
    pub async fn create_consumer(
        &self,
        params: CreateConsumerParams,
        meta: CallMetadata,
    ) -> ClientResult<CreateConsumerResponse> {
        let request = meta.request(CreateConsumerRequest::from(params))?;
        let mut client = self.handles().consumer_api();
        forward("create_consumer", &meta, client.create_consumer(request)).await
    }

    /// Consumer description by name
    pub async fn get_consumer(
        &self,
        consumer_name: impl Into<String>,
        meta: CallMetadata,
    ) -> ClientResult<GetConsumerResponse> {
        let request = meta.request(GetConsumerRequest {
            consumer_name: consumer_name.into(),
        })?;
        let mut client = self.handles().consumer_api();
        forward("get_consumer", &meta, client.get_consumer(request)).await
    }

    /// Descriptions of all consumers
    pub async fn get_consumers(&self, meta: CallMetadata) -> ClientResult<GetConsumersResponse> {
        let request = meta.request(GetConsumersRequest {})?;
        let mut client = self.handles().consumer_api();
        forward("get_consumers", &meta, client.get_consumers(request)).await
    }

    pub async fn delete_consumer(
        &self,
        index_name: impl Into<String>,
        consumer_name: impl Into<String>,
        meta: CallMetadata,
    ) -> ClientResult<DeleteConsumerResponse> {
        let request = meta.request(DeleteConsumerRequest {
            index_name: index_name.into(),
            consumer_name: consumer_name.into(),
        })?;
        let mut client = self.handles().consumer_api();
        forward("delete_consumer", &meta, client.delete_consumer(request)).await
    }
}
