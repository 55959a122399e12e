//! Entry point bridging request envelopes to the operation pipelines.
//!
//! [`StorageHandlers`] owns the shared storage backend and the handler
//! options. The per-operation pipelines live in the `ops` submodules and are
//! exposed here as `create_bucket`, `create_directory` and `upload_file`.

use std::sync::Arc;

use tracing::debug;

use crate::config::HandlerConfig;
use crate::envelope::RequestEnvelope;
use crate::operations::StorageOperation;
use crate::response::ResponseEnvelope;
use crate::storage::StorageBackend;

/// Request handlers for the three storage operations.
///
/// Cloning is cheap: the backend and configuration are `Arc`-shared, and no
/// per-request state is kept between invocations.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use bucketgate_core::config::HandlerConfig;
/// use bucketgate_core::envelope::RequestEnvelope;
/// use bucketgate_core::handler::StorageHandlers;
/// use bucketgate_core::storage::MemoryStorage;
///
/// let handlers = StorageHandlers::new(Arc::new(MemoryStorage::new()), HandlerConfig::default());
/// let envelope = RequestEnvelope::from_text(r#"{"bucket": "my-bucket"}"#);
/// let response = tokio_test::block_on(handlers.create_bucket(&envelope));
/// assert_eq!(response.status_code, 200);
/// ```
#[derive(Debug, Clone)]
pub struct StorageHandlers {
    pub(crate) storage: Arc<dyn StorageBackend>,
    pub(crate) config: Arc<HandlerConfig>,
}

impl StorageHandlers {
    /// Create handlers over a storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>, config: HandlerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// The storage backend serving these handlers.
    #[must_use]
    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Dispatch an envelope to the pipeline of `op`.
    pub async fn handle(&self, op: StorageOperation, envelope: &RequestEnvelope) -> ResponseEnvelope {
        debug!(operation = %op, backend = self.storage.name(), "dispatching storage operation");
        match op {
            StorageOperation::CreateBucket => self.create_bucket(envelope).await,
            StorageOperation::CreateDirectory => self.create_directory(envelope).await,
            StorageOperation::UploadFile => self.upload_file(envelope).await,
        }
    }

    /// Emit the raw envelope to the log when event logging is enabled.
    pub(crate) fn log_event(&self, op: StorageOperation, envelope: &RequestEnvelope) {
        if self.config.log_events {
            match serde_json::to_string(envelope) {
                Ok(event) => debug!(operation = %op, %event, "received event"),
                Err(e) => debug!(operation = %op, error = %e, "received unserializable event"),
            }
        }
    }
}
