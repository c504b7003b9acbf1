use anyhow::Context;
use clap::{Parser, ValueEnum};
use graphload_core::{
    BulkSink, FanOut, GenerationConfig, GenerationSession, PartitionStrategy, RetryPolicy,
    RunSummary,
};
use graphload_sink::{
    ConnectionString, HttpBulkSink, HttpGremlinClient, HttpSettings, JsonLinesSink,
    StatementSink,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Generates a synthetic asset hierarchy and bulk loads it into a Gremlin graph
#[derive(Parser, Debug)]
#[command(name = "graphload")]
#[command(about = "Synthetic graph generator and bulk loader", long_about = None)]
struct Args {
    /// AccountEndpoint=...;AccountKey=...;ApiKind=Gremlin;Database=...;Collection=...
    #[arg(short, long = "connection-string")]
    connection_string: String,

    /// Id of the root node
    #[arg(short, long = "rootname", default_value = "1")]
    root: String,

    /// Elements per bulk import
    #[arg(short, long, default_value_t = 1000)]
    batch_size: usize,

    /// Children per node when using uniform fan-out
    #[arg(short = 'n', long = "numberofnodesoneachlevel", default_value_t = 18)]
    nodes_per_level: u32,

    /// Number of additional traversals, 10 cross-edges each
    #[arg(short = 'a', long = "additiontraversals", default_value_t = 20000)]
    traversals: u32,

    /// Deepest level that gets nodes
    #[arg(long, default_value_t = 5)]
    max_depth: u32,

    /// First level whose nodes are labelled asset
    #[arg(long, default_value_t = 4)]
    asset_threshold: u32,

    #[arg(long, value_enum, default_value_t = FanOutArg::Uniform)]
    fan_out: FanOutArg,

    #[arg(long, value_enum, default_value_t = PartitionArg::Path)]
    partition: PartitionArg,

    /// Name of the vertex property holding the partition key
    #[arg(long, default_value = "partitionId")]
    partition_property: String,

    /// `bulk` needs a bulk-import endpoint in front of the store (see graphload_sink::http)
    #[arg(long, value_enum, default_value_t = TransportArg::Statement)]
    transport: TransportArg,

    /// Output file for the `file` transport
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for reproducible trees
    #[arg(long)]
    seed: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FanOutArg {
    /// Same number of children on every level
    Uniform,
    /// Random child counts from a per-level table
    Table,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PartitionArg {
    /// Root plus first child index
    Path,
    /// Everything in the root's partition
    Root,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TransportArg {
    /// One HTTP bulk import per batch
    Bulk,
    /// One Gremlin statement per element
    Statement,
    /// Write JSON lines to --output, no network
    File,
}

impl Args {
    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            root_id: self.root.trim().to_string(),
            fan_out: match self.fan_out {
                FanOutArg::Uniform => FanOut::Uniform(self.nodes_per_level),
                FanOutArg::Table => FanOut::default_table(),
            },
            max_depth: self.max_depth,
            asset_threshold: self.asset_threshold,
            batch_size: self.batch_size,
            traversals: self.traversals,
            cross_edge_depth: None,
            partition: match self.partition {
                PartitionArg::Path => PartitionStrategy::PathPrefix,
                PartitionArg::Root => PartitionStrategy::Root,
            },
            partition_property: self.partition_property.clone(),
            seed: self.seed,
        }
    }
}

async fn run<S: BulkSink>(config: GenerationConfig, sink: S) -> anyhow::Result<RunSummary> {
    let summary = GenerationSession::new(config, sink)?.run().await?;
    Ok(summary)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting graphload v{}", env!("CARGO_PKG_VERSION"));

    // Everything is checked before a single request goes out.
    let conn = ConnectionString::parse(&args.connection_string);
    let config = args.generation_config();
    if let Err(e) = conn.validate().and_then(|_| config.validate()) {
        error!("Check the parameters: {}", e);
        std::process::exit(2);
    }
    if args.transport == TransportArg::File && args.output.is_none() {
        error!("Check the parameters: the file transport needs --output");
        std::process::exit(2);
    }

    info!("Endpoint: {}", conn.endpoint());
    info!("Database: {}, collection: {}", conn.database, conn.collection);
    info!("Transport: {:?}", args.transport);

    let timeout = Duration::from_secs(args.timeout_secs);
    let retry = RetryPolicy::default();
    let summary = match args.transport {
        TransportArg::Bulk => {
            let sink = HttpBulkSink::from_connection(&conn, timeout, retry)?;
            run(config, sink).await
        }
        TransportArg::Statement => {
            let client = HttpGremlinClient::new(HttpSettings::from_connection(&conn, timeout)?);
            let sink = StatementSink::new(client, retry, config.partition_property.clone());
            run(config, sink).await
        }
        TransportArg::File => {
            let path = args.output.clone().unwrap_or_default();
            let sink = JsonLinesSink::create(&path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            run(config, sink).await
        }
    }?;

    info!(
        "Inserted {} elements ({} vertices, {} tree edges, {} cross-edges) in {} batches",
        summary.total_elements,
        summary.vertices,
        summary.edges,
        summary.cross_edges,
        summary.flushes
    );
    info!("Elapsed: {:.2?}", summary.elapsed);
    info!("Finished");
    Ok(())
}
