//! Per-family service handles

use tonic::transport::Channel;

use crate::proto::{ConsumerApiClient, IndexApiClient, ReflectionApiClient, SearchApiClient};

/// One connected stub per operation family
///
/// Built once and never mutated. Stubs are cheap to clone; every call works
/// on its own clone so calls never contend with each other.
#[derive(Debug, Clone)]
pub struct ServiceHandles {
    index_api: IndexApiClient<Channel>,
    consumer_api: ConsumerApiClient<Channel>,
    search_api: SearchApiClient<Channel>,
    reflection_api: ReflectionApiClient<Channel>,
}

impl ServiceHandles {
    /// Handles for independently connected families
    pub fn new(
        index_api: IndexApiClient<Channel>,
        consumer_api: ConsumerApiClient<Channel>,
        search_api: SearchApiClient<Channel>,
        reflection_api: ReflectionApiClient<Channel>,
    ) -> Self {
        Self {
            index_api,
            consumer_api,
            search_api,
            reflection_api,
        }
    }

    /// All families multiplexed over one channel
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            index_api: IndexApiClient::new(channel.clone()),
            consumer_api: ConsumerApiClient::new(channel.clone()),
            search_api: SearchApiClient::new(channel.clone()),
            reflection_api: ReflectionApiClient::new(channel),
        }
    }

    /// Apply a message size limit to every stub, both directions
    pub fn with_max_message_size(self, limit: usize) -> Self {
        Self {
            index_api: self
                .index_api
                .max_decoding_message_size(limit)
                .max_encoding_message_size(limit),
            consumer_api: self
                .consumer_api
                .max_decoding_message_size(limit)
                .max_encoding_message_size(limit),
            search_api: self
                .search_api
                .max_decoding_message_size(limit)
                .max_encoding_message_size(limit),
            reflection_api: self
                .reflection_api
                .max_decoding_message_size(limit)
                .max_encoding_message_size(limit),
        }
    }

    /// Fresh clone of the index stub
    pub fn index_api(&self) -> IndexApiClient<Channel> {
        self.index_api.clone()
    }

    pub fn consumer_api(&self) -> ConsumerApiClient<Channel> {
        self.consumer_api.clone()
    }

    pub fn search_api(&self) -> SearchApiClient<Channel> {
        self.search_api.clone()
    }

    pub fn reflection_api(&self) -> ReflectionApiClient<Channel> {
        self.reflection_api.clone()
    }
}
