//! In-process mock of the summa gRPC services
//!
//! Keeps just enough state (indices, aliases, consumers) to answer calls the
//! way the real server would, and records each call's method, metadata and
//! encoded request so tests can inspect exactly what went over the wire.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use prost::Message;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use summa_client::proto::consumer_api_server::{ConsumerApi, ConsumerApiServer};
use summa_client::proto::index_api_server::{IndexApi, IndexApiServer};
use summa_client::proto::reflection_api_server::{ReflectionApi, ReflectionApiServer};
use summa_client::proto::search_api_server::{SearchApi, SearchApiServer};
use summa_client::proto::*;
use summa_client::{ClientConfig, SummaClient};

/// One call as seen by the server
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub method: &'static str,
    pub request_id: Option<String>,
    pub session_id: Option<String>,
    /// Request message exactly as encoded on the wire
    pub payload: Vec<u8>,
}

impl CapturedCall {
    pub fn decode<M: Message + Default>(&self) -> M {
        M::decode(self.payload.as_slice()).expect("captured request does not decode")
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<CapturedCall>,
    indices: BTreeMap<String, Index>,
    aliases: BTreeMap<String, String>,
    consumers: BTreeMap<String, Consumer>,
}

/// Mock summa server; clones share state
#[derive(Debug, Clone, Default)]
pub struct MockSummaServer {
    state: Arc<Mutex<State>>,
}

impl MockSummaServer {
    /// Pre-create an index
    pub fn with_index(self, index_name: &str) -> Self {
        self.state.lock().unwrap().indices.insert(
            index_name.to_string(),
            Index {
                index_name: index_name.to_string(),
                ..Default::default()
            },
        );
        self
    }

    /// Pre-create a consumer
    pub fn with_consumer(self, index_name: &str, consumer_name: &str) -> Self {
        self.state.lock().unwrap().consumers.insert(
            consumer_name.to_string(),
            Consumer {
                consumer_name: consumer_name.to_string(),
                index_name: index_name.to_string(),
                ..Default::default()
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_call(&self) -> CapturedCall {
        self.calls().pop().expect("no call recorded")
    }

    fn record<M: Message>(&self, method: &'static str, request: &Request<M>) {
        let header = |key: &str| {
            request
                .metadata()
                .get(key)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        let call = CapturedCall {
            method,
            request_id: header("request-id"),
            session_id: header("session-id"),
            payload: request.get_ref().encode_to_vec(),
        };
        self.state.lock().unwrap().calls.push(call);
    }

    fn index(&self, index_name: &str) -> Result<Index, Status> {
        self.state
            .lock()
            .unwrap()
            .indices
            .get(index_name)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("index {index_name} not found")))
    }
}

#[tonic::async_trait]
impl IndexApi for MockSummaServer {
    async fn commit_index(
        &self,
        request: Request<CommitIndexRequest>,
    ) -> Result<Response<CommitIndexResponse>, Status> {
        self.record("commit_index", &request);
        self.index(&request.get_ref().index_name)?;
        Ok(Response::new(CommitIndexResponse {
            opstamp: Some(1),
            elapsed_secs: 0.5,
        }))
    }

    async fn create_index(
        &self,
        request: Request<CreateIndexRequest>,
    ) -> Result<Response<CreateIndexResponse>, Status> {
        self.record("create_index", &request);
        let req = request.into_inner();

        let mut state = self.state.lock().unwrap();
        if state.indices.contains_key(&req.index_name) {
            return Err(Status::already_exists(format!(
                "index {} already exists",
                req.index_name
            )));
        }
        let index = Index {
            index_name: req.index_name.clone(),
            index_aliases: vec![],
            schema: req.schema,
            compression: req.compression.unwrap_or_default(),
            num_docs: 0,
            primary_key: req.primary_key,
            default_fields: req.default_fields,
            sort_by_field: req.sort_by_field,
        };
        state.indices.insert(req.index_name, index.clone());
        Ok(Response::new(CreateIndexResponse { index: Some(index) }))
    }

    async fn delete_index(
        &self,
        request: Request<DeleteIndexRequest>,
    ) -> Result<Response<DeleteIndexResponse>, Status> {
        self.record("delete_index", &request);
        let req = request.into_inner();

        let mut state = self.state.lock().unwrap();
        if state.indices.remove(&req.index_name).is_none() {
            return Err(Status::not_found(format!(
                "index {} not found",
                req.index_name
            )));
        }
        let mut response = DeleteIndexResponse {
            deleted_index_name: req.index_name.clone(),
            ..Default::default()
        };
        if req.cascade {
            let aliases: Vec<String> = state
                .aliases
                .iter()
                .filter(|(_, name)| **name == req.index_name)
                .map(|(alias, _)| alias.clone())
                .collect();
            for alias in &aliases {
                state.aliases.remove(alias);
            }
            let consumers: Vec<String> = state
                .consumers
                .values()
                .filter(|c| c.index_name == req.index_name)
                .map(|c| c.consumer_name.clone())
                .collect();
            for consumer in &consumers {
                state.consumers.remove(consumer);
            }
            response.deleted_index_aliases = aliases;
            response.deleted_consumers = consumers;
        }
        Ok(Response::new(response))
    }

    async fn get_indices_aliases(
        &self,
        request: Request<GetIndicesAliasesRequest>,
    ) -> Result<Response<GetIndicesAliasesResponse>, Status> {
        self.record("get_indices_aliases", &request);
        let state = self.state.lock().unwrap();
        Ok(Response::new(GetIndicesAliasesResponse {
            indices_aliases: state.aliases.clone().into_iter().collect(),
        }))
    }

    async fn get_index(
        &self,
        request: Request<GetIndexRequest>,
    ) -> Result<Response<GetIndexResponse>, Status> {
        self.record("get_index", &request);
        let index = self.index(&request.get_ref().index_name)?;
        Ok(Response::new(GetIndexResponse { index: Some(index) }))
    }

    async fn get_indices(
        &self,
        request: Request<GetIndicesRequest>,
    ) -> Result<Response<GetIndicesResponse>, Status> {
        self.record("get_indices", &request);
        let state = self.state.lock().unwrap();
        Ok(Response::new(GetIndicesResponse {
            indices: state.indices.values().cloned().collect(),
        }))
    }

    async fn index_document(
        &self,
        request: Request<IndexDocumentRequest>,
    ) -> Result<Response<IndexDocumentResponse>, Status> {
        self.record("index_document", &request);
        self.index(&request.get_ref().index_name)?;
        Ok(Response::new(IndexDocumentResponse {}))
    }

    async fn merge_segments(
        &self,
        request: Request<MergeSegmentsRequest>,
    ) -> Result<Response<MergeSegmentsResponse>, Status> {
        self.record("merge_segments", &request);
        let req = request.into_inner();
        self.index(&req.index_name)?;
        Ok(Response::new(MergeSegmentsResponse {
            segment_id: Some(req.segment_ids.join("+")),
        }))
    }

    async fn set_index_alias(
        &self,
        request: Request<SetIndexAliasRequest>,
    ) -> Result<Response<SetIndexAliasResponse>, Status> {
        self.record("set_index_alias", &request);
        let req = request.into_inner();
        self.index(&req.index_name)?;
        let old_index_name = self
            .state
            .lock()
            .unwrap()
            .aliases
            .insert(req.index_alias, req.index_name);
        Ok(Response::new(SetIndexAliasResponse { old_index_name }))
    }

    async fn vacuum_index(
        &self,
        request: Request<VacuumIndexRequest>,
    ) -> Result<Response<VacuumIndexResponse>, Status> {
        self.record("vacuum_index", &request);
        self.index(&request.get_ref().index_name)?;
        Ok(Response::new(VacuumIndexResponse {
            freed_space_bytes: 4096,
        }))
    }
}

#[tonic::async_trait]
impl ConsumerApi for MockSummaServer {
    async fn create_consumer(
        &self,
        request: Request<CreateConsumerRequest>,
    ) -> Result<Response<CreateConsumerResponse>, Status> {
        self.record("create_consumer", &request);
        let req = request.into_inner();
        self.index(&req.index_name)?;

        let consumer = Consumer {
            consumer_name: req.consumer_name.clone(),
            index_name: req.index_name,
            bootstrap_servers: req.bootstrap_servers,
            group_id: req.group_id,
            topics: req.topics,
            threads: req.threads.unwrap_or(1),
        };
        self.state
            .lock()
            .unwrap()
            .consumers
            .insert(req.consumer_name, consumer.clone());
        Ok(Response::new(CreateConsumerResponse {
            consumer: Some(consumer),
        }))
    }

    async fn get_consumer(
        &self,
        request: Request<GetConsumerRequest>,
    ) -> Result<Response<GetConsumerResponse>, Status> {
        self.record("get_consumer", &request);
        let name = &request.get_ref().consumer_name;
        let consumer = self
            .state
            .lock()
            .unwrap()
            .consumers
            .get(name)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("consumer {name} not found")))?;
        Ok(Response::new(GetConsumerResponse {
            consumer: Some(consumer),
        }))
    }

    async fn get_consumers(
        &self,
        request: Request<GetConsumersRequest>,
    ) -> Result<Response<GetConsumersResponse>, Status> {
        self.record("get_consumers", &request);
        let state = self.state.lock().unwrap();
        Ok(Response::new(GetConsumersResponse {
            consumers: state.consumers.values().cloned().collect(),
        }))
    }

    async fn delete_consumer(
        &self,
        request: Request<DeleteConsumerRequest>,
    ) -> Result<Response<DeleteConsumerResponse>, Status> {
        self.record("delete_consumer", &request);
        let req = request.into_inner();
        self.state
            .lock()
            .unwrap()
            .consumers
            .remove(&req.consumer_name)
            .ok_or_else(|| Status::not_found(format!("consumer {} not found", req.consumer_name)))?;
        Ok(Response::new(DeleteConsumerResponse {
            consumer_name: req.consumer_name,
        }))
    }
}

#[tonic::async_trait]
impl SearchApi for MockSummaServer {
    async fn search(
        &self,
        request: Request<SearchRequest>,
    ) -> Result<Response<SearchResponse>, Status> {
        self.record("search", &request);
        let req = request.into_inner();

        let known = {
            let state = self.state.lock().unwrap();
            state.aliases.contains_key(&req.index_alias) || state.indices.contains_key(&req.index_alias)
        };
        if !known {
            return Err(Status::not_found(format!(
                "index alias {} not found",
                req.index_alias
            )));
        }

        let collector_outputs = req
            .collectors
            .iter()
            .map(|c| {
                let output = match &c.collector {
                    Some(collector::Collector::TopDocs(top_docs)) => {
                        collector_output::CollectorOutput::TopDocs(TopDocsCollectorOutput {
                            scored_documents: vec![],
                            has_next: top_docs.limit == 0,
                        })
                    }
                    Some(collector::Collector::ReservoirSampling(_)) => {
                        collector_output::CollectorOutput::ReservoirSampling(
                            ReservoirSamplingCollectorOutput::default(),
                        )
                    }
                    Some(collector::Collector::Count(_)) => {
                        collector_output::CollectorOutput::Count(CountCollectorOutput { count: 0 })
                    }
                    Some(collector::Collector::Facet(_)) => {
                        collector_output::CollectorOutput::Facet(FacetCollectorOutput::default())
                    }
                    Some(collector::Collector::Aggregation(_)) => {
                        collector_output::CollectorOutput::Aggregation(
                            AggregationCollectorOutput::default(),
                        )
                    }
                    None => return Err(Status::invalid_argument("empty collector")),
                };
                Ok(CollectorOutput {
                    collector_output: Some(output),
                })
            })
            .collect::<Result<Vec<_>, Status>>()?;

        Ok(Response::new(SearchResponse {
            elapsed_secs: 0.01,
            collector_outputs,
        }))
    }
}

#[tonic::async_trait]
impl ReflectionApi for MockSummaServer {
    async fn get_top_terms(
        &self,
        request: Request<GetTopTermsRequest>,
    ) -> Result<Response<GetTopTermsResponse>, Status> {
        self.record("get_top_terms", &request);
        let req = request.into_inner();
        self.index(&req.index_name)?;

        let term_infos = (0..req.top_k.min(3))
            .map(|i| TermInfo {
                key: format!("term{i}").into_bytes(),
                doc_freq: 10 - i,
            })
            .collect();
        let mut per_segment = std::collections::HashMap::new();
        per_segment.insert("segment-0".to_string(), SegmentTerms { term_infos });
        Ok(Response::new(GetTopTermsResponse { per_segment }))
    }
}

/// Serve `mock` on a loopback port
pub async fn spawn_server(mock: MockSummaServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock server");
    let addr = listener.local_addr().expect("mock server has no address");

    tokio::spawn(async move {
        Server::builder()
            .add_service(IndexApiServer::new(mock.clone()))
            .add_service(ConsumerApiServer::new(mock.clone()))
            .add_service(SearchApiServer::new(mock.clone()))
            .add_service(ReflectionApiServer::new(mock))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("mock server failed");
    });

    addr
}

/// Spawn `mock` and connect a client to it
pub async fn connect(mock: &MockSummaServer) -> SummaClient {
    let addr = spawn_server(mock.clone()).await;
    SummaClient::connect(&ClientConfig::new(format!("http://{addr}")))
        .await
        .expect("failed to connect to mock server")
}
