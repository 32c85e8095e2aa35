//! Transport abstraction shared by the HTTP and gRPC clients
//!
//! A [`RemoteRpc`] sends a serialized request for one [`Method`] and hands
//! back the raw response bytes. It owns the target URL and the call counter
//! exposed through [`crate::Datastore::rpc_count`].

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The remote procedures of the Datastore v1beta3 service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    AllocateIds,
    BeginTransaction,
    Commit,
    Lookup,
    Rollback,
    RunQuery,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::AllocateIds,
        Method::BeginTransaction,
        Method::Commit,
        Method::Lookup,
        Method::Rollback,
        Method::RunQuery,
    ];

    /// Name used in HTTP paths and error reports, e.g. `"allocateIds"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::AllocateIds => "allocateIds",
            Method::BeginTransaction => "beginTransaction",
            Method::Commit => "commit",
            Method::Lookup => "lookup",
            Method::Rollback => "rollback",
            Method::RunQuery => "runQuery",
        }
    }

    /// Fully qualified gRPC path, e.g. `/google.datastore.v1beta3.Datastore/Lookup`
    pub fn grpc_path(&self) -> &'static str {
        match self {
            Method::AllocateIds => "/google.datastore.v1beta3.Datastore/AllocateIds",
            Method::BeginTransaction => "/google.datastore.v1beta3.Datastore/BeginTransaction",
            Method::Commit => "/google.datastore.v1beta3.Datastore/Commit",
            Method::Lookup => "/google.datastore.v1beta3.Datastore/Lookup",
            Method::Rollback => "/google.datastore.v1beta3.Datastore/Rollback",
            Method::RunQuery => "/google.datastore.v1beta3.Datastore/RunQuery",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown method: {}", s))
    }
}

/// A connection to the Datastore service
///
/// Implementations report transport failures as [`crate::DatastoreError`]
/// themselves; callers never see a raw I/O or HTTP error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteRpc: Send + Sync {
    /// Send `payload` as the request body of `method` and return the response body
    ///
    /// Every invocation counts towards [`RemoteRpc::rpc_count`], whether or
    /// not it succeeds.
    async fn call(&self, method: Method, payload: Bytes) -> Result<Bytes>;

    /// Reset the call counter to zero
    fn reset_rpc_count(&self);

    /// Number of calls since creation or the last reset
    fn rpc_count(&self) -> u64;

    /// The endpoint this transport talks to
    fn url(&self) -> &str;
}

/// Thread-safe call counter embedded in each transport
#[derive(Debug, Default)]
pub struct RpcCounter(AtomicU64);

impl RpcCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
