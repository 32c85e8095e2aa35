#![no_main]

use async_trait::async_trait;
use bytes::Bytes;
use datastore::proto::datastore::{
    AllocateIdsRequest, BeginTransactionRequest, CommitRequest, LookupRequest, RollbackRequest,
    RunQueryRequest,
};
use datastore::rpc::RpcCounter;
use datastore::{Code, Datastore, Method, RemoteRpc};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::runtime::Runtime;

// Fuzzer for response decoding in the client facade.
//
// Arbitrary bytes are handed back as the response body of every method. The
// client must either decode them or fail with an "Invalid response" error;
// it must never panic.

static RUNTIME: Lazy<Runtime> = Lazy::new(|| Runtime::new().expect("tokio runtime"));

struct ReplayRpc {
    body: Bytes,
    counter: RpcCounter,
}

#[async_trait]
impl RemoteRpc for ReplayRpc {
    async fn call(&self, _method: Method, _payload: Bytes) -> datastore::Result<Bytes> {
        self.counter.increment();
        Ok(self.body.clone())
    }

    fn reset_rpc_count(&self) {
        self.counter.reset();
    }

    fn rpc_count(&self) -> u64 {
        self.counter.get()
    }

    fn url(&self) -> &str {
        "fuzz://replay"
    }
}

fn check<T>(result: datastore::Result<T>) {
    if let Err(error) = result {
        assert_eq!(error.code(), Code::Unavailable);
        assert_eq!(error.message(), "Invalid response");
    }
}

fuzz_target!(|data: &[u8]| {
    let datastore = Datastore::new(Arc::new(ReplayRpc {
        body: Bytes::copy_from_slice(data),
        counter: RpcCounter::new(),
    }));

    RUNTIME.block_on(async {
        check(datastore.allocate_ids(AllocateIdsRequest::default()).await);
        check(
            datastore
                .begin_transaction(BeginTransactionRequest::default())
                .await,
        );
        check(datastore.commit(CommitRequest::default()).await);
        check(datastore.lookup(LookupRequest::default()).await);
        check(datastore.rollback(RollbackRequest::default()).await);
        check(datastore.run_query(RunQueryRequest::default()).await);
    });

    assert_eq!(datastore.rpc_count(), 6);
});
