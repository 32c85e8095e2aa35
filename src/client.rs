//! The Datastore client facade
//!
//! Provides one method per remote procedure. Each serializes its request,
//! sends it through the injected [`RemoteRpc`] and decodes the typed response.

use crate::error::{make_exception, DatastoreError, Result};
use crate::proto::datastore::{
    AllocateIdsRequest, AllocateIdsResponse, BeginTransactionRequest, BeginTransactionResponse,
    CommitRequest, CommitResponse, LookupRequest, LookupResponse, RollbackRequest,
    RollbackResponse, RunQueryRequest, RunQueryResponse,
};
use crate::rpc::{Method, RemoteRpc};
use bytes::Bytes;
use prost::Message;
use std::sync::Arc;
use tonic::Code;

/// Provides access to Cloud Datastore
///
/// Cheaply cloneable; clones share the same transport and therefore the same
/// RPC counter.
///
/// # Example
///
/// ```rust,no_run
/// use datastore::{create_http_client, DatastoreOptions};
/// use datastore::proto::datastore::BeginTransactionRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let options = DatastoreOptions::builder().project_id("my-project").build()?;
///     let datastore = create_http_client(&options)?;
///
///     let response = datastore
///         .begin_transaction(BeginTransactionRequest {
///             project_id: "my-project".to_string(),
///         })
///         .await?;
///     println!("transaction: {:?}", response.transaction);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Datastore {
    rpc: Arc<dyn RemoteRpc>,
}

impl Datastore {
    /// Create a client on top of an existing transport
    pub fn new(rpc: Arc<dyn RemoteRpc>) -> Self {
        Self { rpc }
    }

    /// The transport this client sends requests through
    pub fn remote_rpc(&self) -> &Arc<dyn RemoteRpc> {
        &self.rpc
    }

    /// Reset the RPC count
    pub fn reset_rpc_count(&self) {
        self.rpc.reset_rpc_count();
    }

    /// Returns the number of RPC calls made since the client was created
    /// or [`Datastore::reset_rpc_count`] was called.
    pub fn rpc_count(&self) -> u64 {
        self.rpc.rpc_count()
    }

    /// Allocate IDs for the given incomplete keys
    pub async fn allocate_ids(&self, request: AllocateIdsRequest) -> Result<AllocateIdsResponse> {
        self.invoke(Method::AllocateIds, &request).await
    }

    /// Begin a new transaction
    pub async fn begin_transaction(
        &self,
        request: BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse> {
        self.invoke(Method::BeginTransaction, &request).await
    }

    /// Commit a transaction, optionally creating, deleting or modifying some entities
    pub async fn commit(&self, request: CommitRequest) -> Result<CommitResponse> {
        self.invoke(Method::Commit, &request).await
    }

    /// Look up entities by key
    pub async fn lookup(&self, request: LookupRequest) -> Result<LookupResponse> {
        self.invoke(Method::Lookup, &request).await
    }

    /// Roll back a transaction
    pub async fn rollback(&self, request: RollbackRequest) -> Result<RollbackResponse> {
        self.invoke(Method::Rollback, &request).await
    }

    /// Query for entities
    pub async fn run_query(&self, request: RunQueryRequest) -> Result<RunQueryResponse> {
        self.invoke(Method::RunQuery, &request).await
    }

    async fn invoke<Req, Resp>(&self, method: Method, request: &Req) -> Result<Resp>
    where
        Req: Message,
        Resp: Message + Default,
    {
        let payload = Bytes::from(request.encode_to_vec());
        tracing::debug!("{} ({} bytes) -> {}", method, payload.len(), self.rpc.url());

        let body = self.rpc.call(method, payload).await?;

        Resp::decode(body).map_err(|e| {
            tracing::error!("Failed to decode {} response: {}", method, e);
            self.invalid_response(method, e)
        })
    }

    fn invalid_response(&self, method: Method, error: prost::DecodeError) -> DatastoreError {
        make_exception(
            self.rpc.url(),
            method.as_str(),
            Code::Unavailable,
            "Invalid response",
            Some(Box::new(error)),
        )
    }
}

impl std::fmt::Debug for Datastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datastore")
            .field("url", &self.rpc.url())
            .field("rpc_count", &self.rpc.rpc_count())
            .finish()
    }
}
