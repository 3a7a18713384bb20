//! Index family: lifecycle, aliases, documents and segment maintenance

use crate::client::{forward, CallMetadata, SummaClient};
use crate::error::ClientResult;
use crate::input::{schema, Document};
use crate::proto::*;

/// Arguments of [`SummaClient::create_index`]
///
/// Only `index_name` and `schema` are required. Every optional setting left
/// as `None` (or an empty list) is omitted from the request and the server
/// applies its own default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateIndexParams {
    pub index_name: String,
    /// Inline schema, or a path to a file holding it
    pub schema: String,
    /// Field used during insertion to detect duplicates
    pub primary_key: Option<String>,
    /// Fields searched when a query names none
    pub default_fields: Vec<String>,
    pub multi_fields: Vec<String>,
    /// Words dropped by the query parser
    pub stop_words: Vec<String>,
    pub compression: Option<Compression>,
    /// Writer heap size, shared between all writer threads
    pub writer_heap_size_bytes: Option<u64>,
    pub writer_threads: Option<u64>,
    /// Commit the index in the background every this many milliseconds
    pub autocommit_interval_ms: Option<u64>,
    /// Presort documents by `(field, order)`
    pub sort_by_field: Option<(String, Order)>,
}

impl CreateIndexParams {
    pub fn new(index_name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            schema: schema.into(),
            ..Self::default()
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }

    pub fn with_default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_multi_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_writer_heap_size_bytes(mut self, bytes: u64) -> Self {
        self.writer_heap_size_bytes = Some(bytes);
        self
    }

    pub fn with_writer_threads(mut self, threads: u64) -> Self {
        self.writer_threads = Some(threads);
        self
    }

    pub fn with_autocommit_interval_ms(mut self, interval_ms: u64) -> Self {
        self.autocommit_interval_ms = Some(interval_ms);
        self
    }

    pub fn with_sort_by_field(mut self, field: impl Into<String>, order: Order) -> Self {
        self.sort_by_field = Some((field.into(), order));
        self
    }

    /// Build the wire request, reading the schema from disk if it is a path
    pub async fn into_request(self) -> ClientResult<CreateIndexRequest> {
        let schema = schema::resolve(&self.schema).await?;
        Ok(CreateIndexRequest {
            index_name: self.index_name,
            schema,
            primary_key: self.primary_key,
            default_fields: self.default_fields,
            compression: self.compression.map(|c| c as i32),
            writer_heap_size_bytes: self.writer_heap_size_bytes,
            writer_threads: self.writer_threads,
            autocommit_interval_ms: self.autocommit_interval_ms,
            stop_words: self.stop_words,
            multi_fields: self.multi_fields,
            sort_by_field: self.sort_by_field.map(|(field, order)| SortByField {
                field,
                order: order as i32,
            }),
        })
    }
}

impl SummaClient {
    /// Schedule a commit of the index
    ///
    /// The commit runs asynchronously on the server: consumers of the index
    /// are stopped, the index is committed and the consumers start again.
    pub async fn commit_index(
        &self,
        index_name: impl Into<String>,
        meta: CallMetadata,
    ) -> ClientResult<CommitIndexResponse> {
        let request = meta.request(CommitIndexRequest {
            index_name: index_name.into(),
        })?;
        let mut client = self.handles().index_api();
        forward("commit_index", &meta, client.commit_index(request)).await
    }

    /// Create an index
    ///
    /// # Errors
    ///
    /// Fails locally with `SchemaFile` if `params.schema` names a file that
    /// cannot be read; otherwise errors are the server's.
    pub async fn create_index(
        &self,
        params: CreateIndexParams,
        meta: CallMetadata,
    ) -> ClientResult<CreateIndexResponse> {
        let request = meta.request(params.into_request().await?)?;
        let mut client = self.handles().index_api();
        forward("create_index", &meta, client.create_index(request)).await
    }

    /// Delete an index; with `cascade` its consumers and aliases go too
    pub async fn delete_index(
        &self,
        index_name: impl Into<String>,
        cascade: bool,
        meta: CallMetadata,
    ) -> ClientResult<DeleteIndexResponse> {
        let request = meta.request(DeleteIndexRequest {
            index_name: index_name.into(),
            cascade,
        })?;
        let mut client = self.handles().index_api();
        forward("delete_index", &meta, client.delete_index(request)).await
    }

    /// Index description by name
    pub async fn get_index(
        &self,
        index_name: impl Into<String>,
        meta: CallMetadata,
    ) -> ClientResult<GetIndexResponse> {
        let request = meta.request(GetIndexRequest {
            index_name: index_name.into(),
        })?;
        let mut client = self.handles().index_api();
        forward("get_index", &meta, client.get_index(request)).await
    }

    /// Descriptions of all indices
    pub async fn get_indices(&self, meta: CallMetadata) -> ClientResult<GetIndicesResponse> {
        let request = meta.request(GetIndicesRequest {})?;
        let mut client = self.handles().index_api();
        forward("get_indices", &meta, client.get_indices(request)).await
    }

    /// Alias to index mapping for all indices
    pub async fn get_indices_aliases(
        &self,
        meta: CallMetadata,
    ) -> ClientResult<GetIndicesAliasesResponse> {
        let request = meta.request(GetIndicesAliasesRequest {})?;
        let mut client = self.handles().index_api();
        forward("get_indices_aliases", &meta, client.get_indices_aliases(request)).await
    }

    /// Index a single document
    ///
    /// # Errors
    ///
    /// Fails locally with `InvalidArgument` if a structured document is not a
    /// JSON object.
    pub async fn index_document(
        &self,
        index_name: impl Into<String>,
        document: impl Into<Document>,
        meta: CallMetadata,
    ) -> ClientResult<IndexDocumentResponse> {
        let request = meta.request(IndexDocumentRequest {
            index_name: index_name.into(),
            document: document.into().into_bytes()?,
        })?;
        let mut client = self.handles().index_api();
        forward("index_document", &meta, client.index_document(request)).await
    }

    /// Merge the listed segments into one
    pub async fn merge_segments<I, S>(
        &self,
        index_name: impl Into<String>,
        segment_ids: I,
        meta: CallMetadata,
    ) -> ClientResult<MergeSegmentsResponse>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = meta.request(MergeSegmentsRequest {
            index_name: index_name.into(),
            segment_ids: segment_ids.into_iter().map(Into::into).collect(),
        })?;
        let mut client = self.handles().index_api();
        forward("merge_segments", &meta, client.merge_segments(request)).await
    }

    /// Point `index_alias` at `index_name`, replacing any previous binding
    pub async fn set_index_alias(
        &self,
        index_alias: impl Into<String>,
        index_name: impl Into<String>,
        meta: CallMetadata,
    ) -> ClientResult<SetIndexAliasResponse> {
        let request = meta.request(SetIndexAliasRequest {
            index_alias: index_alias.into(),
            index_name: index_name.into(),
        })?;
        let mut client = self.handles().index_api();
        forward("set_index_alias", &meta, client.set_index_alias(request)).await
    }

    /// Reclaim space held by deleted and stale segments
    pub async fn vacuum_index(
        &self,
        index_name: impl Into<String>,
        meta: CallMetadata,
    ) -> ClientResult<VacuumIndexResponse> {
        let request = meta.request(VacuumIndexRequest {
            index_name: index_name.into(),
        })?;
        let mut client = self.handles().index_api();
        forward("vacuum_index", &meta, client.vacuum_index(request)).await
    }
}
