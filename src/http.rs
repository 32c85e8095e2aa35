//! HTTP transport
//!
//! Sends protobuf-encoded requests to the Datastore REST endpoint
//! (`POST {project_url}:{method}`) and returns the raw response body.

use crate::error::{make_exception, DatastoreError, Result, PROTOBUF_CONTENT_TYPE};
use crate::rpc::{Method, RemoteRpc, RpcCounter};
use crate::DatastoreOptions;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use tonic::Code;

const API_FORMAT_VERSION_HEADER: &str = "x-goog-api-format-version";

/// [`RemoteRpc`] over HTTP/1.1 with protobuf bodies
pub struct HttpRemoteRpc {
    client: reqwest::Client,
    url: String,
    access_token: Option<String>,
    counter: RpcCounter,
}

impl HttpRemoteRpc {
    /// Create a transport for the endpoint described by `options`
    ///
    /// No connection is made until the first call.
    pub fn new(options: &DatastoreOptions) -> Result<Self> {
        let url = options.project_url();

        let mut builder = reqwest::Client::builder().user_agent(crate::USER_AGENT);
        if let Some(timeout) = options.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            make_exception(
                &url,
                "connect",
                Code::Internal,
                "Unable to build HTTP client",
                Some(Box::new(e)),
            )
        })?;

        Ok(Self::with_client(
            client,
            url,
            options.access_token().map(str::to_owned),
        ))
    }

    /// Create a transport from an existing reqwest client
    ///
    /// Useful when the caller wants to share a connection pool or configure
    /// the client beyond what [`DatastoreOptions`] exposes.
    pub fn with_client(client: reqwest::Client, url: String, access_token: Option<String>) -> Self {
        Self {
            client,
            url,
            access_token,
            counter: RpcCounter::new(),
        }
    }

    fn io_error(&self, method: Method, error: reqwest::Error) -> DatastoreError {
        tracing::warn!("{} to {} failed: {}", method, self.url, error);
        make_exception(
            &self.url,
            method.as_str(),
            Code::Unavailable,
            "I/O error",
            Some(Box::new(error)),
        )
    }
}

#[async_trait]
impl RemoteRpc for HttpRemoteRpc {
    async fn call(&self, method: Method, payload: Bytes) -> Result<Bytes> {
        self.counter.increment();

        let target = format!("{}:{}", self.url, method);
        tracing::debug!("POST {}", target);

        let mut request = self
            .client
            .post(&target)
            .header(CONTENT_TYPE, HeaderValue::from_static(PROTOBUF_CONTENT_TYPE))
            .header(API_FORMAT_VERSION_HEADER, HeaderValue::from_static("2"))
            .body(payload);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.io_error(method, e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| self.io_error(method, e))?;

        if !status.is_success() {
            let error = DatastoreError::from_http_response(
                &self.url,
                method.as_str(),
                status.as_u16(),
                content_type.as_deref(),
                &body,
            );
            tracing::warn!("{} returned HTTP {}: {}", method, status.as_u16(), error);
            return Err(error);
        }

        Ok(body)
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
