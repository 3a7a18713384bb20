//! summa-cli - command line client for the summa search server

use std::fmt::Debug;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use summa_client::proto::{
    collector, query, AllQuery, Collector, CountCollector, MatchQuery, Query, TopDocsCollector,
};
use summa_client::{
    CallMetadata, ClientConfig, Collectors, Compression, CreateConsumerParams, CreateIndexParams,
    Document, Order, SummaClient,
};

#[derive(Parser, Debug)]
#[command(name = "summa-cli")]
#[command(about = "Command line client for the summa search server")]
struct Args {
    /// summa gRPC endpoint
    #[arg(long, env = "SUMMA_ENDPOINT", default_value = summa_client::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Log level
    #[arg(long, env = "SUMMA_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Request id sent as `request-id` call metadata
    #[arg(long, global = true)]
    request_id: Option<String>,

    /// Session id sent as `session-id` call metadata
    #[arg(long, global = true)]
    session_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schedule an index commit
    CommitIndex { index_name: String },

    /// Create a consumer reading the given topics into an index
    CreateConsumer {
        index_name: String,
        consumer_name: String,
        /// Queue bootstrap server (repeatable)
        #[arg(long = "bootstrap-server", required = true)]
        bootstrap_servers: Vec<String>,
        #[arg(long)]
        group_id: String,
        /// Topic to consume (repeatable)
        #[arg(long = "topic", required = true)]
        topics: Vec<String>,
        #[arg(long)]
        threads: Option<u32>,
    },

    /// Create an index
    CreateIndex {
        index_name: String,
        /// Inline schema or path to a schema file
        #[arg(long)]
        schema: String,
        #[arg(long)]
        primary_key: Option<String>,
        #[arg(long = "default-field")]
        default_fields: Vec<String>,
        #[arg(long = "multi-field")]
        multi_fields: Vec<String>,
        #[arg(long = "stop-word")]
        stop_words: Vec<String>,
        /// none, brotli, lz4, snappy or zstd
        #[arg(long, value_parser = parse_compression)]
        compression: Option<Compression>,
        #[arg(long)]
        writer_heap_size_bytes: Option<u64>,
        #[arg(long)]
        writer_threads: Option<u64>,
        #[arg(long)]
        autocommit_interval_ms: Option<u64>,
        /// `field:asc` or `field:desc`
        #[arg(long, value_parser = parse_sort_by_field)]
        sort_by_field: Option<(String, Order)>,
    },

    /// Delete a consumer
    DeleteConsumer {
        index_name: String,
        consumer_name: String,
    },

    /// Delete an index
    DeleteIndex {
        index_name: String,
        /// Also delete the index's consumers and aliases
        #[arg(long)]
        cascade: bool,
    },

    /// Show one consumer
    GetConsumer { consumer_name: String },

    /// List consumers
    GetConsumers,

    /// Show one index
    GetIndex { index_name: String },

    /// List indices
    GetIndices,

    /// List aliases of all indices
    GetIndicesAliases,

    /// Index one document
    IndexDocument {
        index_name: String,
        /// JSON object, or arbitrary bytes with --raw
        document: String,
        /// Send the document bytes as given
        #[arg(long)]
        raw: bool,
    },

    /// Search an index
    Search {
        index_alias: String,
        /// Match query text; all documents if omitted
        #[arg(long)]
        query: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Also count matching documents
        #[arg(long)]
        count: bool,
    },

    /// Merge segments into one
    MergeSegments {
        index_name: String,
        #[arg(required = true)]
        segment_ids: Vec<String>,
    },

    /// Point an alias at an index
    SetIndexAlias {
        index_alias: String,
        index_name: String,
    },

    /// Reclaim space in an index
    VacuumIndex { index_name: String },

    /// Most frequent terms of a field
    GetTopTerms {
        index_name: String,
        field_name: String,
        #[arg(long, default_value_t = 10)]
        top_k: u32,
    },
}

fn parse_order(s: &str) -> Result<Order, String> {
    match s.to_ascii_lowercase().as_str() {
        "asc" => Ok(Order::Asc),
        "desc" => Ok(Order::Desc),
        _ => Err(format!("unknown order `{s}`, expected asc or desc")),
    }
}

fn parse_sort_by_field(s: &str) -> Result<(String, Order), String> {
    let (field, order) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected `field:order`, got `{s}`"))?;
    if field.is_empty() {
        return Err(format!("missing field name in `{s}`"));
    }
    Ok((field.to_string(), parse_order(order)?))
}

fn parse_compression(s: &str) -> Result<Compression, String> {
    match s.to_ascii_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "brotli" => Ok(Compression::Brotli),
        "lz4" => Ok(Compression::Lz4),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        _ => Err(format!("unknown compression `{s}`")),
    }
}

fn print<T: Debug>(response: T) {
    println!("{response:#?}");
}

fn search_query(text: Option<String>) -> Query {
    let query = match text {
        Some(value) => query::Query::Match(MatchQuery {
            value,
            default_fields: Vec::new(),
        }),
        None => query::Query::All(AllQuery {}),
    };
    Query { query: Some(query) }
}

async fn run(client: &SummaClient, command: Command, meta: CallMetadata) -> anyhow::Result<()> {
    match command {
        Command::CommitIndex { index_name } => print(client.commit_index(index_name, meta).await?),
        Command::CreateConsumer {
            index_name,
            consumer_name,
            bootstrap_servers,
            group_id,
            topics,
            threads,
        } => {
            let mut params = CreateConsumerParams::new(
                index_name,
                consumer_name,
                bootstrap_servers,
                group_id,
                topics,
            );
            params.threads = threads;
            print(client.create_consumer(params, meta).await?)
        }
        Command::CreateIndex {
            index_name,
            schema,
            primary_key,
            default_fields,
            multi_fields,
            stop_words,
            compression,
            writer_heap_size_bytes,
            writer_threads,
            autocommit_interval_ms,
            sort_by_field,
        } => {
            let params = CreateIndexParams {
                index_name,
                schema,
                primary_key,
                default_fields,
                multi_fields,
                stop_words,
                compression,
                writer_heap_size_bytes,
                writer_threads,
                autocommit_interval_ms,
                sort_by_field,
            };
            print(client.create_index(params, meta).await?)
        }
        Command::DeleteConsumer {
            index_name,
            consumer_name,
        } => print(client.delete_consumer(index_name, consumer_name, meta).await?),
        Command::DeleteIndex { index_name, cascade } => {
            print(client.delete_index(index_name, cascade, meta).await?)
        }
        Command::GetConsumer { consumer_name } => {
            print(client.get_consumer(consumer_name, meta).await?)
        }
        Command::GetConsumers => print(client.get_consumers(meta).await?),
        Command::GetIndex { index_name } => print(client.get_index(index_name, meta).await?),
        Command::GetIndices => print(client.get_indices(meta).await?),
        Command::GetIndicesAliases => print(client.get_indices_aliases(meta).await?),
        Command::IndexDocument {
            index_name,
            document,
            raw,
        } => {
            let document = if raw {
                Document::Raw(document.into_bytes())
            } else {
                let value: serde_json::Value =
                    serde_json::from_str(&document).context("document is not valid JSON")?;
                Document::Json(value)
            };
            print(client.index_document(index_name, document, meta).await?)
        }
        Command::Search {
            index_alias,
            query,
            limit,
            offset,
            count,
        } => {
            let mut collectors: Vec<Collector> = vec![collector::Collector::TopDocs(TopDocsCollector {
                limit,
                offset,
                ..Default::default()
            })
            .into()];
            if count {
                collectors.push(collector::Collector::Count(CountCollector {}).into());
            }
            let response = client
                .search(index_alias, search_query(query), Collectors::from(collectors), meta)
                .await?;
            print(response)
        }
        Command::MergeSegments {
            index_name,
            segment_ids,
        } => print(client.merge_segments(index_name, segment_ids, meta).await?),
        Command::SetIndexAlias {
            index_alias,
            index_name,
        } => print(client.set_index_alias(index_alias, index_name, meta).await?),
        Command::VacuumIndex { index_name } => print(client.vacuum_index(index_name, meta).await?),
        Command::GetTopTerms {
            index_name,
            field_name,
            top_k,
        } => print(client.get_top_terms(index_name, field_name, top_k, meta).await?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig {
        endpoint: args.endpoint,
        ..ClientConfig::from_env()
    };
    let client = SummaClient::connect(&config)
        .await
        .with_context(|| format!("failed to connect to {}", config.endpoint))?;

    let meta = CallMetadata {
        request_id: args.request_id,
        session_id: args.session_id,
    };
    run(&client, args.command, meta).await
}
