//! Datastore CLI
//!
//! Sends individual Datastore RPCs to a live project or a local emulator.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -- --transport=http|grpc allocate-ids --kind Task --count 3
//! ```
//!
//! ## Environment Variables
//!
//! - `DATASTORE_PROJECT_ID`: Project to talk to
//! - `DATASTORE_EMULATOR_HOST`: `host:port` of a local emulator
//! - `DATASTORE_PROJECT_ENDPOINT`: Full project endpoint override
//! - `DATASTORE_ACCESS_TOKEN`: OAuth2 bearer token
//! - `RUST_LOG`: Logging level (default: "datastore=info")

use clap::{Parser, Subcommand};
use datastore::helper::{kind_query, with_limit, KeyBuilder};
use datastore::proto::datastore::{
    run_query_request::QueryType, AllocateIdsRequest, BeginTransactionRequest, Key,
    LookupRequest, RollbackRequest, RunQueryRequest,
};
use datastore::{create_grpc_client, create_http_client, Datastore, DatastoreOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Http,
    Grpc,
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Transport::Http),
            "grpc" => Ok(Transport::Grpc),
            _ => Err(format!(
                "Invalid transport: {}. Must be one of: http, grpc",
                s
            )),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "datastore")]
#[command(about = "Send Cloud Datastore v1beta3 RPCs over HTTP or gRPC")]
struct Args {
    /// Transport used to reach the service
    #[arg(long, value_name = "TRANSPORT", default_value = "http")]
    transport: Transport,

    /// Project id (overrides DATASTORE_PROJECT_ID)
    #[arg(long)]
    project: Option<String>,

    /// Emulator `host:port` (overrides DATASTORE_EMULATOR_HOST)
    #[arg(long)]
    emulator_host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Allocate ids for incomplete keys of one kind
    AllocateIds {
        #[arg(long)]
        kind: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Look up a single entity by kind and name or id
    Lookup {
        #[arg(long)]
        kind: String,
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        name: Option<String>,
        #[arg(long)]
        id: Option<i64>,
    },
    /// Run a kind query
    Query {
        #[arg(long)]
        kind: String,
        #[arg(long, default_value_t = 20)]
        limit: i32,
    },
    /// Begin a transaction and print its handle
    BeginTransaction,
    /// Begin and roll back a transaction to check connectivity
    Ping,
}

fn load_options(args: &Args) -> Result<DatastoreOptions, datastore::OptionsError> {
    let project = args.project.clone();
    let emulator_host = args.emulator_host.clone();
    DatastoreOptions::from_lookup(|name| match name {
        datastore::options::PROJECT_ID_ENV_VAR if project.is_some() => project.clone(),
        datastore::options::LOCAL_HOST_ENV_VAR if emulator_host.is_some() => {
            emulator_host.clone()
        }
        _ => std::env::var(name).ok(),
    })
}

/// Key for `lookup`; a name takes precedence over an id
fn lookup_key(
    project_id: &str,
    kind: String,
    name: Option<String>,
    id: Option<i64>,
) -> Result<Key, String> {
    let builder = KeyBuilder::new().project(project_id);
    let builder = match (name, id) {
        (Some(name), _) => builder.name(kind, name),
        (None, Some(id)) => builder.id(kind, id),
        (None, None) => return Err(format!("{} key needs a name or an id", kind)),
    };
    Ok(builder.build())
}

async fn run(
    datastore: &Datastore,
    project_id: String,
    command: Command,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match command {
        Command::AllocateIds { kind, count } => {
            let keys = (0..count)
                .map(|_| {
                    KeyBuilder::new()
                        .project(project_id.as_str())
                        .incomplete(kind.as_str())
                        .build()
                })
                .collect();
            let response = datastore
                .allocate_ids(AllocateIdsRequest { project_id, keys })
                .await?;
            println!("{:#?}", response.keys);
        }
        Command::Lookup { kind, name, id } => {
            let key = lookup_key(&project_id, kind, name, id)?;
            let response = datastore
                .lookup(LookupRequest {
                    project_id,
                    read_options: None,
                    keys: vec![key],
                })
                .await?;
            println!("{:#?}", response);
        }
        Command::Query { kind, limit } => {
            let response = datastore
                .run_query(RunQueryRequest {
                    project_id,
                    query_type: Some(QueryType::Query(with_limit(kind_query(kind), limit))),
                    ..Default::default()
                })
                .await?;
            println!("{:#?}", response.batch);
        }
        Command::BeginTransaction => {
            let response = datastore
                .begin_transaction(BeginTransactionRequest { project_id })
                .await?;
            println!("{:?}", response.transaction);
        }
        Command::Ping => {
            let transaction = datastore
                .begin_transaction(BeginTransactionRequest {
                    project_id: project_id.clone(),
                })
                .await?
                .transaction;
            datastore
                .rollback(RollbackRequest {
                    project_id,
                    transaction,
                })
                .await?;
            println!("OK ({} RPCs)", datastore.rpc_count());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datastore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args = Args::parse();
    let options = load_options(&args)?;
    tracing::info!("Using {:?} transport with {:?}", args.transport, options);

    let datastore = match args.transport {
        Transport::Http => create_http_client(&options)?,
        Transport::Grpc => create_grpc_client(&options).await?,
    };
    tracing::info!("Endpoint: {}", datastore.remote_rpc().url());

    let project_id = options.project_id().unwrap_or_default().to_string();
    run(&datastore, project_id, args.command).await
}
