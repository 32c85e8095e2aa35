//! Error types for the Datastore client
//!
//! Every failure surfaced by a transport or by the client facade is a
//! [`DatastoreError`], carrying the target URL, the method that failed and a
//! `google.rpc.Code` category (shared with [`tonic::Code`]).

use crate::proto::rpc;
use prost::Message;
use serde::Deserialize;
use thiserror::Error;
use tonic::Code;

/// Result type alias for Datastore operations
pub type Result<T> = std::result::Result<T, DatastoreError>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The single error type returned by RPC calls
#[derive(Debug, Error)]
#[error("{message}, code={code:?}")]
pub struct DatastoreError {
    url: String,
    method: String,
    code: Code,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl DatastoreError {
    /// Create an error without an underlying cause
    pub fn new(
        url: impl Into<String>,
        method: impl Into<String>,
        code: Code,
        message: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The URL of the endpoint the call was sent to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The name of the remote method, e.g. `"lookup"`
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Build an error from a gRPC status returned by the server
    pub fn from_status(url: &str, method: &str, status: tonic::Status) -> Self {
        let code = status.code();
        let message = status.message().to_string();
        Self::new(url, method, code, message).with_source(status)
    }

    /// Translate a non-success HTTP response into an error
    ///
    /// The body is decoded as a `google.rpc.Status` when the server says it
    /// sent protobuf, as a Google API JSON error envelope when it sent JSON,
    /// and is otherwise reported verbatim under [`Code::Internal`].
    pub fn from_http_response(
        url: &str,
        method: &str,
        http_status: u16,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Self {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .unwrap_or_default();

        if mime.eq_ignore_ascii_case(PROTOBUF_CONTENT_TYPE) {
            return match rpc::Status::decode(body) {
                Ok(status) => Self::new(url, method, Code::from_i32(status.code), status.message),
                Err(e) => Self::new(
                    url,
                    method,
                    Code::Internal,
                    format!(
                        "Unable to parse Status protocol buffer: HTTP status code was {}.",
                        http_status
                    ),
                )
                .with_source(e),
            };
        }

        let text = String::from_utf8_lossy(body);

        if mime.eq_ignore_ascii_case("application/json") {
            if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
                let code = envelope
                    .error
                    .status
                    .as_deref()
                    .and_then(code_from_name)
                    .unwrap_or_else(|| code_from_http_status(http_status));
                return Self::new(url, method, code, envelope.error.message);
            }
        }

        Self::new(
            url,
            method,
            Code::Internal,
            format!(
                "Non-protobuf error: {}. HTTP status code was {}.",
                text, http_status
            ),
        )
    }
}

/// Build a [`DatastoreError`] for a failed call
///
/// Shared by the transports and the client facade so that every failure is
/// reported with the same fields.
pub fn make_exception(
    url: &str,
    method: &str,
    code: Code,
    message: &str,
    source: Option<BoxError>,
) -> DatastoreError {
    let error = DatastoreError::new(url, method, code, message);
    match source {
        Some(source) => error.with_source(source),
        None => error,
    }
}

/// Content type of protobuf request and response bodies
pub(crate) const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Map a canonical code name such as `"NOT_FOUND"` to its [`Code`]
fn code_from_name(name: &str) -> Option<Code> {
    let code = match name {
        "OK" => Code::Ok,
        "CANCELLED" => Code::Cancelled,
        "UNKNOWN" => Code::Unknown,
        "INVALID_ARGUMENT" => Code::InvalidArgument,
        "DEADLINE_EXCEEDED" => Code::DeadlineExceeded,
        "NOT_FOUND" => Code::NotFound,
        "ALREADY_EXISTS" => Code::AlreadyExists,
        "PERMISSION_DENIED" => Code::PermissionDenied,
        "RESOURCE_EXHAUSTED" => Code::ResourceExhausted,
        "FAILED_PRECONDITION" => Code::FailedPrecondition,
        "ABORTED" => Code::Aborted,
        "OUT_OF_RANGE" => Code::OutOfRange,
        "UNIMPLEMENTED" => Code::Unimplemented,
        "INTERNAL" => Code::Internal,
        "UNAVAILABLE" => Code::Unavailable,
        "DATA_LOSS" => Code::DataLoss,
        "UNAUTHENTICATED" => Code::Unauthenticated,
        _ => return None,
    };
    Some(code)
}

/// Best-effort mapping used when the body carries no canonical code
fn code_from_http_status(status: u16) -> Code {
    match status {
        400 => Code::InvalidArgument,
        401 => Code::Unauthenticated,
        403 => Code::PermissionDenied,
        404 => Code::NotFound,
        409 => Code::Aborted,
        429 => Code::ResourceExhausted,
        499 => Code::Cancelled,
        501 => Code::Unimplemented,
        503 => Code::Unavailable,
        504 => Code::DeadlineExceeded,
        _ => Code::Internal,
    }
}

impl From<DatastoreError> for tonic::Status {
    fn from(error: DatastoreError) -> Self {
        tonic::Status::new(error.code, error.message)
    }
}

/// Errors raised while assembling [`crate::DatastoreOptions`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// Neither a project id nor a project endpoint was configured
    #[error("Either project ID or project endpoint must be provided")]
    MissingProject,

    /// Two settings that pick the endpoint were given at once
    #[error("Conflicting endpoint settings: {0}")]
    ConflictingEndpoint(String),

    /// Credentials were combined with a local emulator host
    #[error("Can't use credentials with a local host")]
    CredentialsWithLocalHost,

    /// The endpoint could not be parsed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
