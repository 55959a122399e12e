//! Operation pipelines.
//!
//! Each operation runs `parse -> validate -> (normalize) -> (decode) ->
//! invoke -> map`. Any failure short-circuits the remaining steps and the
//! remote call is the only step with an external effect. Failures are
//! turned into response envelopes here; nothing propagates to the caller.

mod bucket;
mod directory;
mod upload;

use http::StatusCode;
use tracing::warn;

use crate::error::{HandlerError, RemoteError};
use crate::operations::StorageOperation;
use crate::response::ResponseEnvelope;

/// Respond `400` to a request rejected before any remote call.
fn rejected(op: StorageOperation, err: &HandlerError) -> ResponseEnvelope {
    warn!(operation = %op, class = err.class(), error = %err, "rejected request");
    ResponseEnvelope::error(StatusCode::BAD_REQUEST, err.to_string())
}

/// Record a failed remote call.
fn log_remote_failure(op: StorageOperation, bucket: &str, err: &RemoteError) {
    warn!(
        operation = %op,
        bucket = %bucket,
        code = %err.code,
        error = %err.message,
        "storage call failed"
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::config::HandlerConfig;
    use crate::error::RemoteError;
    use crate::handler::StorageHandlers;
    use crate::response::{ResponseBody, ResponseEnvelope};
    use crate::storage::{MemoryStorage, StorageBackend};

    /// Backend that fails every call with a fixed error and counts calls.
    #[derive(Debug)]
    pub(crate) struct FailingStorage {
        pub(crate) error: RemoteError,
        pub(crate) calls: AtomicUsize,
    }

    impl FailingStorage {
        pub(crate) fn new(code: &str, message: &str) -> Self {
            Self {
                error: RemoteError::new(code, message),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StorageBackend for FailingStorage {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn create_container(&self, _name: &str) -> Result<(), RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(self.error.clone())
        }

        async fn put_object(
            &self,
            _bucket: &str,
            _key: &str,
            _data: Bytes,
            _content_type: Option<&str>,
        ) -> Result<(), RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(self.error.clone())
        }
    }

    pub(crate) fn memory_handlers(config: HandlerConfig) -> (Arc<MemoryStorage>, StorageHandlers) {
        let storage = Arc::new(MemoryStorage::new());
        let handlers = StorageHandlers::new(storage.clone(), config);
        (storage, handlers)
    }

    pub(crate) fn failing_handlers(code: &str) -> (Arc<FailingStorage>, StorageHandlers) {
        let storage = Arc::new(FailingStorage::new(code, "simulated failure"));
        let handlers = StorageHandlers::new(storage.clone(), HandlerConfig::default());
        (storage, handlers)
    }

    pub(crate) fn body(response: &ResponseEnvelope) -> ResponseBody {
        response.decode_body().expect("handler bodies are valid JSON")
    }

    pub(crate) fn error_text(response: &ResponseEnvelope) -> String {
        body(response).error().unwrap_or_default().to_owned()
    }

    pub(crate) fn message_text(response: &ResponseEnvelope) -> String {
        body(response).message().unwrap_or_default().to_owned()
    }
}
