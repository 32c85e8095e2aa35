//! # Datastore
//!
//! A thin client for the Cloud Datastore v1beta3 API over HTTP and gRPC.
//!
//! ## Features
//!
//! - **Typed operations**: `allocate_ids`, `begin_transaction`, `commit`,
//!   `lookup`, `rollback` and `run_query`, each taking and returning the
//!   protocol message for that call
//! - **Pluggable transport**: protobuf over HTTP or unary gRPC, behind the
//!   [`RemoteRpc`] trait so tests can substitute a fixture
//! - **One error type**: every failure is a [`DatastoreError`] carrying the
//!   endpoint, the method and a canonical status code
//! - **RPC accounting**: a per-transport call counter for test assertions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use datastore::{create_http_client, DatastoreOptions};
//! use datastore::helper::{kind_query, with_limit};
//! use datastore::proto::datastore::{run_query_request::QueryType, RunQueryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads DATASTORE_PROJECT_ID, DATASTORE_EMULATOR_HOST, ...
//!     let options = DatastoreOptions::from_env()?;
//!     let datastore = create_http_client(&options)?;
//!
//!     let response = datastore
//!         .run_query(RunQueryRequest {
//!             project_id: options.project_id().unwrap_or_default().to_string(),
//!             query_type: Some(QueryType::Query(with_limit(kind_query("Task"), 10))),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("{:?}", response.batch);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod grpc;
pub mod helper;
pub mod http;
pub mod options;
pub mod proto;
pub mod rpc;

pub use client::Datastore;
pub use error::{make_exception, DatastoreError, OptionsError, Result};
pub use grpc::GrpcRemoteRpc;
pub use http::HttpRemoteRpc;
pub use options::{DatastoreOptions, DatastoreOptionsBuilder};
pub use rpc::{Method, RemoteRpc};

// Re-export commonly used types
pub use tonic::Code;

use std::sync::Arc;

/// Creates a client that talks protobuf over HTTP
///
/// # Example
///
/// ```rust,no_run
/// use datastore::{create_http_client, DatastoreOptions};
///
/// let options = DatastoreOptions::builder()
///     .project_id("my-project")
///     .local_host("localhost:8081")
///     .build()?;
/// let datastore = create_http_client(&options)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn create_http_client(options: &DatastoreOptions) -> Result<Datastore> {
    let rpc = HttpRemoteRpc::new(options)?;
    Ok(Datastore::new(Arc::new(rpc)))
}

/// Creates a client that issues unary gRPC calls
///
/// # Example
///
/// ```rust,no_run
/// use datastore::{create_grpc_client, DatastoreOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let options = DatastoreOptions::builder()
///         .project_id("my-project")
///         .local_host("localhost:8081")
///         .build()?;
///     let datastore = create_grpc_client(&options).await?;
///     Ok(())
/// }
/// ```
pub async fn create_grpc_client(options: &DatastoreOptions) -> Result<Datastore> {
    let rpc = GrpcRemoteRpc::connect(options).await?;
    Ok(Datastore::new(Arc::new(rpc)))
}

/// Default service host
pub const DEFAULT_HOST: &str = "https://datastore.googleapis.com";

/// API version segment of the REST path
pub const API_VERSION: &str = "v1beta3";

/// User agent sent with every HTTP request
pub const USER_AGENT: &str = concat!("datastore-rs/", env!("CARGO_PKG_VERSION"));
