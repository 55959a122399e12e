//! In-memory storage backend.
//!
//! Keeps containers and objects in concurrent maps and reports the same error
//! codes S3 does for the situations the handlers care about. Used by tests
//! and by the local server's `memory` mode.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::error::RemoteError;

use super::StorageBackend;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// An object held by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object contents.
    pub data: Bytes,
    /// Content type recorded at upload time.
    pub content_type: Option<String>,
}

/// A container and its objects, keyed by object key.
#[derive(Debug, Default)]
struct MemoryBucket {
    objects: DashMap<String, StoredObject>,
}

/// Concurrent in-memory object store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    buckets: DashMap<String, MemoryBucket>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a container exists.
    #[must_use]
    pub fn bucket_exists(&self, bucket: &str) -> bool {
        self.buckets.contains_key(bucket)
    }

    /// Fetch a copy of a stored object.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.buckets
            .get(bucket)
            .and_then(|b| b.objects.get(key).map(|o| o.value().clone()))
    }

    /// Sorted keys of every object in a container.
    #[must_use]
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .buckets
            .get(bucket)
            .map(|b| b.objects.iter().map(|o| o.key().clone()).collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create_container(&self, name: &str) -> Result<(), RemoteError> {
        validate_bucket_name(name)?;
        match self.buckets.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(RemoteError::bucket_already_owned(name)),
            Entry::Vacant(slot) => {
                slot.insert(MemoryBucket::default());
                debug!(bucket = %name, "bucket created");
                Ok(())
            }
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), RemoteError> {
        let container = self
            .buckets
            .get(bucket)
            .ok_or_else(|| RemoteError::no_such_bucket(bucket))?;
        debug!(bucket = %bucket, key = %key, size = data.len(), "object stored");
        container.objects.insert(
            key.to_owned(),
            StoredObject {
                data,
                content_type: content_type.map(ToOwned::to_owned),
            },
        );
        Ok(())
    }
}

/// Check a container name against the S3 naming rules.
fn validate_bucket_name(name: &str) -> Result<(), RemoteError> {
    let invalid = |reason: &str| Err(RemoteError::invalid_bucket_name(name, reason));
    let len = name.len();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return invalid(&format!(
            "Bucket name must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
        ));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return invalid(
            "Bucket name must only contain lowercase letters, numbers, hyphens, and dots",
        );
    }
    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !edge_ok(name.as_bytes()[0]) || !edge_ok(name.as_bytes()[len - 1]) {
        return invalid("Bucket name must start and end with a letter or number");
    }
    if name.contains("..") {
        return invalid("Bucket name must not contain consecutive dots");
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return invalid("Bucket name must not be formatted as an IP address");
    }
    Ok(())
}
