//! Storage backend abstraction.
//!
//! [`StorageBackend`] is the narrow capability surface the handlers need from
//! an object store. Implementations are shared across invocations behind an
//! `Arc`, so they must be `Send + Sync` and free of per-request state.
//!
//! The backend trait uses `#[async_trait]` because handlers hold it as
//! `Arc<dyn StorageBackend>`.

pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::RemoteError;

pub use memory::MemoryStorage;

/// Remote object storage operations consumed by the handlers.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name for logs and health reports (e.g. `"s3"`).
    fn name(&self) -> &'static str;

    /// Create a container.
    async fn create_container(&self, name: &str) -> Result<(), RemoteError>;

    /// Store an object, replacing any object with the same key.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), RemoteError>;

    /// Store an empty marker object.
    async fn put_marker(&self, bucket: &str, key: &str) -> Result<(), RemoteError> {
        self.put_object(bucket, key, Bytes::new(), None).await
    }
}
