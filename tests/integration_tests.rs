//! Integration tests for the Datastore client
//!
//! The HTTP tests run against an in-process axum server that imitates the
//! Datastore REST endpoint (`POST /v1beta3/projects/{project}:{method}`).

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use datastore::helper::{kind_query, make_entity, upsert, KeyBuilder};
use datastore::proto::datastore::{
    key::path_element::IdType, query_result_batch::MoreResultsType, run_query_request::QueryType,
    AllocateIdsRequest, AllocateIdsResponse, BeginTransactionRequest, BeginTransactionResponse,
    CommitRequest, CommitResponse, EntityResult, LookupRequest, LookupResponse, MutationResult,
    QueryResultBatch, RollbackRequest, RollbackResponse, RunQueryRequest, RunQueryResponse,
};
use datastore::proto::rpc;
use datastore::{create_http_client, Code, Datastore, DatastoreOptions};
use prost::Message;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

const PROJECT: &str = "test-project";

/// Headers seen by the fake server for one request
#[derive(Debug, Clone)]
struct Seen {
    method: String,
    content_type: Option<String>,
    authorization: Option<String>,
    format_version: Option<String>,
}

#[derive(Clone, Default)]
struct FakeDatastore {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl FakeDatastore {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

fn protobuf(message: impl Message) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/x-protobuf")],
        message.encode_to_vec(),
    )
        .into_response()
}

fn rpc_error(status: StatusCode, code: Code, message: &str) -> Response {
    let body = rpc::Status {
        code: code as i32,
        message: message.to_string(),
        details: vec![],
    };
    (
        status,
        [(header::CONTENT_TYPE, "application/x-protobuf")],
        body.encode_to_vec(),
    )
        .into_response()
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn key_name(key: &datastore::proto::datastore::Key) -> Option<&str> {
    match key.path.last().and_then(|e| e.id_type.as_ref()) {
        Some(IdType::Name(name)) => Some(name.as_str()),
        _ => None,
    }
}

async fn handle(
    State(state): State<FakeDatastore>,
    Path(target): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some((project, method)) = target.split_once(':') else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    state.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        content_type: header_value(&headers, "content-type"),
        authorization: header_value(&headers, "authorization"),
        format_version: header_value(&headers, "x-goog-api-format-version"),
    });

    if project != PROJECT {
        return rpc_error(StatusCode::NOT_FOUND, Code::NotFound, "project not found");
    }

    match method {
        "allocateIds" => {
            let request = AllocateIdsRequest::decode(body).unwrap();
            let keys = request
                .keys
                .into_iter()
                .zip(100i64..)
                .map(|(mut key, id)| {
                    if let Some(leaf) = key.path.last_mut() {
                        leaf.id_type = Some(IdType::Id(id));
                    }
                    key
                })
                .collect();
            protobuf(AllocateIdsResponse { keys })
        }
        "beginTransaction" => protobuf(BeginTransactionResponse {
            transaction: b"tx-1".to_vec(),
        }),
        "commit" => {
            let request = CommitRequest::decode(body).unwrap();
            if request.mutations.is_empty() {
                return rpc_error(
                    StatusCode::BAD_REQUEST,
                    Code::InvalidArgument,
                    "no mutations",
                );
            }
            protobuf(CommitResponse {
                mutation_results: request
                    .mutations
                    .iter()
                    .map(|_| MutationResult { key: None })
                    .collect(),
                index_updates: request.mutations.len() as i32,
            })
        }
        "lookup" => {
            let request = LookupRequest::decode(body).unwrap();
            let mut response = LookupResponse::default();
            for key in request.keys {
                let name = key_name(&key).map(str::to_owned);
                match name.as_deref() {
                    Some("corrupt") => {
                        return (
                            StatusCode::OK,
                            [(header::CONTENT_TYPE, "application/x-protobuf")],
                            vec![0x0a, 0x05, 0x01],
                        )
                            .into_response();
                    }
                    Some("explode") => {
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            [(header::CONTENT_TYPE, "text/plain")],
                            "boom",
                        )
                            .into_response();
                    }
                    Some("present") => response.found.push(EntityResult {
                        entity: Some(make_entity(key, [("done", true.into())])),
                        version: 1,
                        cursor: vec![],
                    }),
                    _ => response.missing.push(EntityResult {
                        entity: Some(make_entity(key, Vec::<(String, _)>::new())),
                        version: 0,
                        cursor: vec![],
                    }),
                }
            }
            protobuf(response)
        }
        "rollback" => {
            let request = RollbackRequest::decode(body).unwrap();
            if request.transaction == b"deny" {
                return (
                    StatusCode::FORBIDDEN,
                    [(header::CONTENT_TYPE, "application/json; charset=UTF-8")],
                    r#"{"error":{"code":403,"message":"caller lacks permission","status":"PERMISSION_DENIED"}}"#,
                )
                    .into_response();
            }
            protobuf(RollbackResponse {})
        }
        "runQuery" => protobuf(RunQueryResponse {
            batch: Some(QueryResultBatch {
                entity_results: vec![EntityResult {
                    entity: Some(make_entity(
                        KeyBuilder::new().project(PROJECT).name("Task", "t1").build(),
                        [("priority", 4i64.into())],
                    )),
                    version: 3,
                    cursor: b"c1".to_vec(),
                }],
                end_cursor: b"c1".to_vec(),
                more_results: MoreResultsType::NoMoreResults as i32,
                ..Default::default()
            }),
            query: None,
        }),
        _ => (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], "Not Found")
            .into_response(),
    }
}

async fn spawn_fake_datastore() -> (FakeDatastore, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to port");
    let addr = listener.local_addr().expect("Failed to get local address");

    let state = FakeDatastore::default();
    let app = Router::new()
        .route("/v1beta3/projects/{target}", post(handle))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (state, addr)
}

fn emulator_client(addr: SocketAddr) -> Datastore {
    let options = DatastoreOptions::builder()
        .project_id(PROJECT)
        .local_host(addr.to_string())
        .build()
        .unwrap();
    create_http_client(&options).expect("Failed to create client")
}

mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_http_allocate_ids() {
        let (fake, addr) = spawn_fake_datastore().await;
        let datastore = emulator_client(addr);
        assert_eq!(datastore.rpc_count(), 0);

        let keys = (0..3)
            .map(|_| KeyBuilder::new().project(PROJECT).incomplete("Task").build())
            .collect();
        let response = datastore
            .allocate_ids(AllocateIdsRequest {
                project_id: PROJECT.to_string(),
                keys,
            })
            .await
            .unwrap();

        assert_eq!(response.keys.len(), 3);
        assert_eq!(response.keys[2].path[0].id_type, Some(IdType::Id(102)));
        assert_eq!(datastore.rpc_count(), 1);

        let seen = fake.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, "allocateIds");
        assert_eq!(seen[0].content_type.as_deref(), Some("application/x-protobuf"));
        assert_eq!(seen[0].format_version.as_deref(), Some("2"));
        assert_eq!(seen[0].authorization, None);
    }

    #[tokio::test]
    async fn test_http_bearer_token() {
        let (fake, addr) = spawn_fake_datastore().await;
        let options = DatastoreOptions::builder()
            .project_endpoint(format!("http://{}/v1beta3/projects/{}", addr, PROJECT))
            .access_token("secret-token")
            .build()
            .unwrap();
        let datastore = create_http_client(&options).unwrap();

        datastore
            .begin_transaction(BeginTransactionRequest {
                project_id: PROJECT.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            fake.seen()[0].authorization.as_deref(),
            Some("Bearer secret-token")
        );
    }

    #[tokio::test]
    async fn test_http_five_operations_and_reset() {
        let (_fake, addr) = spawn_fake_datastore().await;
        let datastore = emulator_client(addr);

        let transaction = datastore
            .begin_transaction(BeginTransactionRequest {
                project_id: PROJECT.to_string(),
            })
            .await
            .unwrap()
            .transaction;
        assert_eq!(transaction, b"tx-1");

        let present = KeyBuilder::new().project(PROJECT).name("Task", "present").build();
        let absent = KeyBuilder::new().project(PROJECT).name("Task", "absent").build();
        let lookup = datastore
            .lookup(LookupRequest {
                project_id: PROJECT.to_string(),
                read_options: None,
                keys: vec![present.clone(), absent],
            })
            .await
            .unwrap();
        assert_eq!(lookup.found.len(), 1);
        assert_eq!(lookup.missing.len(), 1);

        let query = datastore
            .run_query(RunQueryRequest {
                project_id: PROJECT.to_string(),
                query_type: Some(QueryType::Query(kind_query("Task"))),
                ..Default::default()
            })
            .await
            .unwrap();
        let batch = query.batch.unwrap();
        assert_eq!(batch.entity_results.len(), 1);
        assert_eq!(batch.more_results(), MoreResultsType::NoMoreResults);

        let commit = datastore
            .commit(CommitRequest {
                project_id: PROJECT.to_string(),
                mutations: vec![upsert(make_entity(present, [("done", false.into())]))],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(commit.index_updates, 1);

        datastore
            .rollback(RollbackRequest {
                project_id: PROJECT.to_string(),
                transaction,
            })
            .await
            .unwrap();

        assert_eq!(datastore.rpc_count(), 5);
        datastore.reset_rpc_count();
        assert_eq!(datastore.rpc_count(), 0);
    }

    #[tokio::test]
    async fn test_http_corrupt_response() {
        let (_fake, addr) = spawn_fake_datastore().await;
        let datastore = emulator_client(addr);

        let error = datastore
            .lookup(LookupRequest {
                project_id: PROJECT.to_string(),
                read_options: None,
                keys: vec![KeyBuilder::new().project(PROJECT).name("Task", "corrupt").build()],
            })
            .await
            .unwrap_err();

        assert_eq!(error.code(), Code::Unavailable);
        assert_eq!(error.method(), "lookup");
        assert_eq!(error.message(), "Invalid response");
        assert_eq!(
            error.url(),
            format!("http://{}/v1beta3/projects/{}", addr, PROJECT)
        );
        assert_eq!(datastore.rpc_count(), 1);
    }

    #[tokio::test]
    async fn test_http_protobuf_status_error() {
        let (_fake, addr) = spawn_fake_datastore().await;
        let datastore = emulator_client(addr);

        let error = datastore
            .commit(CommitRequest {
                project_id: PROJECT.to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(error.code(), Code::InvalidArgument);
        assert_eq!(error.message(), "no mutations");
        assert_eq!(error.method(), "commit");
    }

    #[tokio::test]
    async fn test_http_json_error() {
        let (_fake, addr) = spawn_fake_datastore().await;
        let datastore = emulator_client(addr);

        let error = datastore
            .rollback(RollbackRequest {
                project_id: PROJECT.to_string(),
                transaction: b"deny".to_vec(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.code(), Code::PermissionDenied);
        assert_eq!(error.message(), "caller lacks permission");
    }

    #[tokio::test]
    async fn test_http_plain_text_error() {
        let (_fake, addr) = spawn_fake_datastore().await;
        let datastore = emulator_client(addr);

        let error = datastore
            .lookup(LookupRequest {
                project_id: PROJECT.to_string(),
                read_options: None,
                keys: vec![KeyBuilder::new().project(PROJECT).name("Task", "explode").build()],
            })
            .await
            .unwrap_err();

        assert_eq!(error.code(), Code::Internal);
        assert_eq!(
            error.message(),
            "Non-protobuf error: boom. HTTP status code was 500."
        );
    }

    #[tokio::test]
    async fn test_http_unknown_project() {
        let (_fake, addr) = spawn_fake_datastore().await;
        let options = DatastoreOptions::builder()
            .project_id("other-project")
            .local_host(addr.to_string())
            .build()
            .unwrap();
        let datastore = create_http_client(&options).unwrap();

        let error = datastore
            .begin_transaction(BeginTransactionRequest {
                project_id: "other-project".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.code(), Code::NotFound);
        assert_eq!(error.method(), "beginTransaction");
    }

    #[tokio::test]
    async fn test_http_server_gone() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let datastore = emulator_client(addr);
        let error = datastore
            .begin_transaction(BeginTransactionRequest::default())
            .await
            .unwrap_err();

        assert_eq!(error.code(), Code::Unavailable);
        assert_eq!(error.message(), "I/O error");
        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(datastore.rpc_count(), 1);
    }
}

mod grpc_tests {
    use super::*;
    use bytes::{Buf, BufMut};
    use datastore::{create_grpc_client, GrpcRemoteRpc, Method};
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
    use tonic::codegen::{http, Body, BoxFuture, Context, Poll, Service, StdError};
    use tonic::server::{NamedService, UnaryService};
    use tonic::transport::Server;

    const TOKEN: &str = "grpc-token";

    /// Request path and `authorization` metadata seen by the fake server
    #[derive(Debug, Clone)]
    struct GrpcSeen {
        path: String,
        authorization: Option<String>,
    }

    /// Serves `google.datastore.v1beta3.Datastore` with canned responses
    #[derive(Clone, Default)]
    struct FakeGrpcDatastore {
        seen: Arc<Mutex<Vec<GrpcSeen>>>,
    }

    impl FakeGrpcDatastore {
        fn seen(&self) -> Vec<GrpcSeen> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl NamedService for FakeGrpcDatastore {
        const NAME: &'static str = "google.datastore.v1beta3.Datastore";
    }

    impl<B> Service<http::Request<B>> for FakeGrpcDatastore
    where
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::Body>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let path = req.uri().path().to_string();
            self.seen.lock().unwrap().push(GrpcSeen {
                path: path.clone(),
                authorization: req
                    .headers()
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned),
            });

            match Method::ALL.into_iter().find(|m| m.grpc_path() == path) {
                Some(method) => Box::pin(async move {
                    let mut grpc = tonic::server::Grpc::new(RawCodec);
                    Ok(grpc.unary(Respond(method), req).await)
                }),
                None => Box::pin(async move {
                    let mut response = http::Response::new(tonic::body::Body::default());
                    let headers = response.headers_mut();
                    headers.insert(
                        "grpc-status",
                        http::HeaderValue::from(Code::Unimplemented as i32),
                    );
                    headers.insert(
                        http::header::CONTENT_TYPE,
                        http::HeaderValue::from_static("application/grpc"),
                    );
                    Ok(response)
                }),
            }
        }
    }

    struct Respond(Method);

    impl UnaryService<Bytes> for Respond {
        type Response = Bytes;
        type Future = BoxFuture<tonic::Response<Bytes>, tonic::Status>;

        fn call(&mut self, request: tonic::Request<Bytes>) -> Self::Future {
            let method = self.0;
            let body = request.into_inner();
            Box::pin(async move { respond(method, body).map(tonic::Response::new) })
        }
    }

    fn bad_request(error: prost::DecodeError) -> tonic::Status {
        tonic::Status::invalid_argument(error.to_string())
    }

    fn respond(method: Method, body: Bytes) -> Result<Bytes, tonic::Status> {
        let encoded = match method {
            Method::AllocateIds => {
                let request = AllocateIdsRequest::decode(body).map_err(bad_request)?;
                let keys = request
                    .keys
                    .into_iter()
                    .zip(200i64..)
                    .map(|(mut key, id)| {
                        if let Some(leaf) = key.path.last_mut() {
                            leaf.id_type = Some(IdType::Id(id));
                        }
                        key
                    })
                    .collect();
                AllocateIdsResponse { keys }.encode_to_vec()
            }
            Method::BeginTransaction => BeginTransactionResponse {
                transaction: b"grpc-tx".to_vec(),
            }
            .encode_to_vec(),
            Method::Commit => {
                let request = CommitRequest::decode(body).map_err(bad_request)?;
                if request.mutations.is_empty() {
                    return Err(tonic::Status::invalid_argument("no mutations"));
                }
                CommitResponse {
                    mutation_results: request
                        .mutations
                        .iter()
                        .map(|_| MutationResult { key: None })
                        .collect(),
                    index_updates: request.mutations.len() as i32,
                }
                .encode_to_vec()
            }
            Method::Lookup => {
                let request = LookupRequest::decode(body).map_err(bad_request)?;
                LookupResponse {
                    found: request
                        .keys
                        .into_iter()
                        .map(|key| EntityResult {
                            entity: Some(make_entity(key, [("done", false.into())])),
                            version: 2,
                            cursor: vec![],
                        })
                        .collect(),
                    ..Default::default()
                }
                .encode_to_vec()
            }
            Method::Rollback => {
                let request = RollbackRequest::decode(body).map_err(bad_request)?;
                if request.transaction == b"deny" {
                    return Err(tonic::Status::permission_denied("caller lacks permission"));
                }
                RollbackResponse {}.encode_to_vec()
            }
            Method::RunQuery => RunQueryResponse {
                batch: Some(QueryResultBatch {
                    more_results: MoreResultsType::NoMoreResults as i32,
                    ..Default::default()
                }),
                query: None,
            }
            .encode_to_vec(),
        };
        Ok(Bytes::from(encoded))
    }

    #[derive(Debug, Clone, Copy, Default)]
    struct RawCodec;

    impl Codec for RawCodec {
        type Encode = Bytes;
        type Decode = Bytes;
        type Encoder = RawCodec;
        type Decoder = RawCodec;

        fn encoder(&mut self) -> Self::Encoder {
            RawCodec
        }

        fn decoder(&mut self) -> Self::Decoder {
            RawCodec
        }
    }

    impl Encoder for RawCodec {
        type Item = Bytes;
        type Error = tonic::Status;

        fn encode(&mut self, item: Bytes, dst: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
            dst.put(item);
            Ok(())
        }
    }

    impl Decoder for RawCodec {
        type Item = Bytes;
        type Error = tonic::Status;

        fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Bytes>, Self::Error> {
            Ok(Some(src.copy_to_bytes(src.remaining())))
        }
    }

    async fn spawn_fake_grpc_datastore() -> (FakeGrpcDatastore, SocketAddr) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let state = FakeGrpcDatastore::default();
        let service = state.clone();
        tokio::spawn(async move {
            Server::builder()
                .add_service(service)
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .unwrap();
        });

        // Give the server time to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        (state, addr)
    }

    async fn grpc_client(addr: SocketAddr) -> Datastore {
        let rpc = GrpcRemoteRpc::connect_to(format!("http://{}", addr), Some(TOKEN), None)
            .await
            .expect("Failed to connect to gRPC server");
        Datastore::new(Arc::new(rpc))
    }

    #[tokio::test]
    async fn test_grpc_six_operations() {
        let (fake, addr) = spawn_fake_grpc_datastore().await;
        let datastore = grpc_client(addr).await;

        let allocated = datastore
            .allocate_ids(AllocateIdsRequest {
                project_id: PROJECT.to_string(),
                keys: vec![
                    KeyBuilder::new().project(PROJECT).incomplete("Task").build(),
                    KeyBuilder::new().project(PROJECT).incomplete("Task").build(),
                ],
            })
            .await
            .unwrap();
        let ids: Vec<_> = allocated
            .keys
            .iter()
            .map(|k| k.path[0].id_type.clone())
            .collect();
        assert_eq!(ids, vec![Some(IdType::Id(200)), Some(IdType::Id(201))]);

        let transaction = datastore
            .begin_transaction(BeginTransactionRequest {
                project_id: PROJECT.to_string(),
            })
            .await
            .unwrap()
            .transaction;
        assert_eq!(transaction, b"grpc-tx");

        let key = KeyBuilder::new().project(PROJECT).name("Task", "t1").build();
        let commit = datastore
            .commit(CommitRequest {
                project_id: PROJECT.to_string(),
                mutations: vec![upsert(make_entity(key.clone(), [("done", true.into())]))],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(commit.index_updates, 1);

        let lookup = datastore
            .lookup(LookupRequest {
                project_id: PROJECT.to_string(),
                read_options: None,
                keys: vec![key.clone()],
            })
            .await
            .unwrap();
        assert_eq!(lookup.found.len(), 1);
        assert_eq!(lookup.found[0].entity.as_ref().unwrap().key, Some(key));

        datastore
            .rollback(RollbackRequest {
                project_id: PROJECT.to_string(),
                transaction,
            })
            .await
            .unwrap();

        let query = datastore
            .run_query(RunQueryRequest {
                project_id: PROJECT.to_string(),
                query_type: Some(QueryType::Query(kind_query("Task"))),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            query.batch.unwrap().more_results,
            MoreResultsType::NoMoreResults as i32
        );

        assert_eq!(datastore.rpc_count(), 6);

        let seen = fake.seen();
        let paths: Vec<_> = seen.iter().map(|s| s.path.as_str()).collect();
        let expected: Vec<_> = Method::ALL.iter().map(|m| m.grpc_path()).collect();
        assert_eq!(paths, expected);
        for request in &seen {
            assert_eq!(request.authorization.as_deref(), Some("Bearer grpc-token"));
        }
    }

    #[tokio::test]
    async fn test_grpc_status_passes_through() {
        let (_fake, addr) = spawn_fake_grpc_datastore().await;
        let datastore = grpc_client(addr).await;

        let error = datastore
            .commit(CommitRequest {
                project_id: PROJECT.to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(error.code(), Code::InvalidArgument);
        assert_eq!(error.message(), "no mutations");
        assert_eq!(error.method(), "commit");
        assert_eq!(error.url(), format!("http://{}", addr));

        let error = datastore
            .rollback(RollbackRequest {
                project_id: PROJECT.to_string(),
                transaction: b"deny".to_vec(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.code(), Code::PermissionDenied);
        assert_eq!(error.message(), "caller lacks permission");
        assert!(std::error::Error::source(&error).is_some());

        assert_eq!(datastore.rpc_count(), 2);
        datastore.reset_rpc_count();
        assert_eq!(datastore.rpc_count(), 0);
    }

    #[tokio::test]
    async fn test_grpc_factory_without_token() {
        let (fake, addr) = spawn_fake_grpc_datastore().await;
        let options = DatastoreOptions::builder()
            .project_id(PROJECT)
            .local_host(addr.to_string())
            .build()
            .unwrap();

        let datastore = create_grpc_client(&options).await.unwrap();
        assert_eq!(datastore.remote_rpc().url(), format!("http://{}", addr));

        let response = datastore
            .begin_transaction(BeginTransactionRequest {
                project_id: PROJECT.to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.transaction, b"grpc-tx");
        assert_eq!(fake.seen()[0].authorization, None);
    }

    #[tokio::test]
    async fn test_grpc_connect_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let options = DatastoreOptions::builder()
            .project_id("test-project")
            .local_host(addr.to_string())
            .build()
            .unwrap();

        let error = create_grpc_client(&options).await.err().unwrap();
        assert_eq!(error.code(), Code::Unavailable);
        assert_eq!(error.url(), format!("http://{}", addr));
    }

    #[tokio::test]
    #[ignore] // Requires a running Datastore emulator with gRPC enabled
    async fn test_grpc_emulator_round_trip() {
        let options = DatastoreOptions::from_env().expect("DATASTORE_* variables");
        let datastore = create_grpc_client(&options).await.unwrap();

        let response = datastore
            .begin_transaction(BeginTransactionRequest {
                project_id: options.project_id().unwrap_or_default().to_string(),
            })
            .await
            .unwrap();

        assert!(!response.transaction.is_empty());
        assert_eq!(datastore.rpc_count(), 1);
    }
}
