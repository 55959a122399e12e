//! Request handlers for basic object-storage operations.
//!
//! BucketGate turns gateway request envelopes into single storage calls:
//! creating a container, creating a directory marker, and uploading a
//! Base64-encoded file. Every outcome, including every failure, is returned
//! as a [`ResponseEnvelope`].
//!
//! # Architecture
//!
//! ```text
//! RequestEnvelope
//!        |
//!        v
//! StorageHandlers (parse -> validate -> normalize -> decode)
//!        |
//!        v
//! dyn StorageBackend (S3, in-memory)
//!        |
//!        v
//! ResponseEnvelope { statusCode, body }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
mod ops;
pub mod operations;
pub mod path;
pub mod payload;
pub mod response;
pub mod storage;
pub mod validation;

pub use config::{BucketGateConfig, HandlerConfig, StorageBackendKind};
pub use envelope::RequestEnvelope;
pub use error::{BucketGateError, HandlerError, RemoteError, RemoteErrorKind};
pub use handler::StorageHandlers;
pub use operations::StorageOperation;
pub use response::ResponseEnvelope;
pub use storage::{MemoryStorage, StorageBackend};
