//! gRPC transport
//!
//! Issues unary calls on `google.datastore.v1beta3.Datastore` over a tonic
//! [`Channel`]. Requests and responses cross the channel as already-encoded
//! bytes, so the same [`RemoteRpc`] contract holds as for HTTP.

use crate::error::{make_exception, DatastoreError, Result};
use crate::rpc::{Method, RemoteRpc, RpcCounter};
use crate::DatastoreOptions;
use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes};
use std::time::Duration;
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::{Channel, Endpoint};
use tonic::Code;

/// [`RemoteRpc`] over a gRPC channel
pub struct GrpcRemoteRpc {
    channel: Channel,
    url: String,
    authorization: Option<MetadataValue<Ascii>>,
    counter: RpcCounter,
}

impl GrpcRemoteRpc {
    /// Connect to the service endpoint described by `options`
    pub async fn connect(options: &DatastoreOptions) -> Result<Self> {
        Self::connect_to(
            options.service_url(),
            options.access_token(),
            options.timeout(),
        )
        .await
    }

    /// Connect to `url` (e.g. `"http://127.0.0.1:8081"`)
    pub async fn connect_to(
        url: impl Into<String>,
        access_token: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let url = url.into();
        tracing::debug!("Connecting gRPC channel to {}", url);

        let mut endpoint = Endpoint::from_shared(url.clone()).map_err(|e| {
            make_exception(
                &url,
                "connect",
                Code::InvalidArgument,
                "Invalid endpoint",
                Some(Box::new(e)),
            )
        })?;
        if let Some(timeout) = timeout {
            endpoint = endpoint.timeout(timeout);
        }

        let channel = endpoint.connect().await.map_err(|e| {
            tracing::error!("Failed to connect to {}: {}", url, e);
            make_exception(
                &url,
                "connect",
                Code::Unavailable,
                "Unable to connect",
                Some(Box::new(e)),
            )
        })?;

        Self::from_channel(channel, url, access_token)
    }

    /// Wrap an existing channel
    pub fn from_channel(channel: Channel, url: String, access_token: Option<&str>) -> Result<Self> {
        let authorization = access_token
            .map(|token| {
                MetadataValue::try_from(format!("Bearer {}", token)).map_err(|e| {
                    make_exception(
                        &url,
                        "connect",
                        Code::InvalidArgument,
                        "Access token is not a valid header value",
                        Some(Box::new(e)),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            channel,
            url,
            authorization,
            counter: RpcCounter::new(),
        })
    }
}

#[async_trait]
impl RemoteRpc for GrpcRemoteRpc {
    async fn call(&self, method: Method, payload: Bytes) -> Result<Bytes> {
        self.counter.increment();
        tracing::debug!("gRPC {} -> {}", method.grpc_path(), self.url);

        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready().await.map_err(|e| {
            tracing::warn!("gRPC channel to {} not ready: {}", self.url, e);
            make_exception(
                &self.url,
                method.as_str(),
                Code::Unavailable,
                "Service was not ready",
                Some(Box::new(e)),
            )
        })?;

        let mut request = tonic::Request::new(payload);
        if let Some(authorization) = &self.authorization {
            request
                .metadata_mut()
                .insert("authorization", authorization.clone());
        }

        let response = grpc
            .unary(request, PathAndQuery::from_static(method.grpc_path()), BytesCodec)
            .await
            .map_err(|status| {
                tracing::warn!("gRPC {} failed: {}", method, status);
                DatastoreError::from_status(&self.url, method.as_str(), status)
            })?;

        Ok(response.into_inner())
    }

    fn reset_rpc_count(&self) {
        self.counter.reset();
    }

    fn rpc_count(&self) -> u64 {
        self.counter.get()
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Passes message bytes through untouched; (de)serialization happens in the client
#[derive(Debug, Clone, Copy, Default)]
struct BytesCodec;

impl Codec for BytesCodec {
    type Encode = Bytes;
    type Decode = Bytes;
    type Encoder = BytesCodec;
    type Decoder = BytesCodec;

    fn encoder(&mut self) -> Self::Encoder {
        BytesCodec
    }

    fn decoder(&mut self) -> Self::Decoder {
        BytesCodec
    }
}

impl Encoder for BytesCodec {
    type Item = Bytes;
    type Error = tonic::Status;

    fn encode(&mut self, item: Bytes, dst: &mut EncodeBuf<'_>) -> std::result::Result<(), Self::Error> {
        dst.put(item);
        Ok(())
    }
}

impl Decoder for BytesCodec {
    type Item = Bytes;
    type Error = tonic::Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> std::result::Result<Option<Bytes>, Self::Error> {
        Ok(Some(src.copy_to_bytes(src.remaining())))
    }
}
