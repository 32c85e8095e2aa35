//! Protocol message types for the Cloud Datastore v1beta3 API
//!
//! These are the types `prost-build` emits for `google/datastore/v1beta3/*.proto`
//! and the handful of shared packages they import. They are kept in-tree so the
//! crate builds without `protoc`.

pub mod datastore;
pub mod protobuf;
pub mod rpc;
pub mod r#type;
