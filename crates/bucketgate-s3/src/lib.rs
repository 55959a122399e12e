//! Amazon S3 storage backend for BucketGate.
//!
//! [`S3Storage`] implements [`bucketgate_core::StorageBackend`] on top of the
//! AWS SDK. Service error codes are passed through as
//! [`bucketgate_core::RemoteError`] codes, so the handlers see the same
//! `NoSuchBucket` / `BucketAlreadyOwnedByYou` codes the service returned.

mod error;
pub mod storage;

pub use storage::S3Storage;
