//! Error types for BucketGate handlers.
//!
//! Two layers of errors exist:
//!
//! - [`RemoteError`] is what a storage backend reports: a classification
//!   code (e.g. `NoSuchBucket`) and a human-readable description. Codes are
//!   classified into the closed set of [`RemoteErrorKind`]s.
//! - [`HandlerError`] is the failure of one step of an operation pipeline.
//!   Every variant is converted into a response envelope at the dispatcher
//!   boundary; none escapes to the caller.
//!
//! [`BucketGateError`] covers configuration problems discovered at startup.

use std::fmt;

/// Remote error codes meaning the container already exists.
const CONFLICT_CODES: &[&str] = &["BucketAlreadyOwnedByYou", "BucketAlreadyExists"];

/// Remote error codes meaning the container does not exist.
const NOT_FOUND_CODES: &[&str] = &["NoSuchBucket"];

/// Classification of a [`RemoteError`] code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    /// The target container already exists (owned by the caller or someone else).
    AlreadyExists,
    /// The target container does not exist.
    NotFound,
    /// Any other failure, including unrecognized codes.
    Other,
}

impl RemoteErrorKind {
    /// Classify a remote error code.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketgate_core::error::RemoteErrorKind;
    ///
    /// assert_eq!(RemoteErrorKind::classify("NoSuchBucket"), RemoteErrorKind::NotFound);
    /// assert_eq!(RemoteErrorKind::classify("SlowDown"), RemoteErrorKind::Other);
    /// ```
    #[must_use]
    pub fn classify(code: &str) -> Self {
        if CONFLICT_CODES.contains(&code) {
            Self::AlreadyExists
        } else if NOT_FOUND_CODES.contains(&code) {
            Self::NotFound
        } else {
            Self::Other
        }
    }
}

/// A failure reported by the remote storage service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("An error occurred ({code}): {message}")]
pub struct RemoteError {
    /// The classification code reported by the service.
    pub code: String,
    /// A human-readable description of the failure.
    pub message: String,
}

impl RemoteError {
    /// Create a new remote error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The container does not exist.
    #[must_use]
    pub fn no_such_bucket(bucket: &str) -> Self {
        Self::new(
            "NoSuchBucket",
            format!("The specified bucket does not exist: {bucket}"),
        )
    }

    /// The container already exists and belongs to the caller.
    #[must_use]
    pub fn bucket_already_owned(bucket: &str) -> Self {
        Self::new(
            "BucketAlreadyOwnedByYou",
            format!(
                "Your previous request to create the named bucket succeeded and you already own it: {bucket}"
            ),
        )
    }

    /// The container name violates the naming rules.
    #[must_use]
    pub fn invalid_bucket_name(bucket: &str, reason: &str) -> Self {
        Self::new(
            "InvalidBucketName",
            format!("Invalid bucket name: {bucket}: {reason}"),
        )
    }

    /// Classify this error's code.
    #[must_use]
    pub fn kind(&self) -> RemoteErrorKind {
        RemoteErrorKind::classify(&self.code)
    }
}

/// Field names reported by a [`HandlerError::MissingField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList(pub Vec<&'static str>);

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{field}'")?;
        }
        Ok(())
    }
}

/// Failure of one step of an operation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The envelope body is not a JSON object.
    #[error("invalid JSON in body: {0}")]
    InvalidPayload(String),

    /// One or more required fields are absent, empty or not text.
    #[error("missing required parameter(s) in body: {0}")]
    MissingField(FieldList),

    /// The Base64 payload could not be decoded.
    #[error("error decoding Base64: {0}")]
    InvalidEncoding(String),

    /// The remote storage call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl HandlerError {
    /// Build a [`HandlerError::MissingField`] from field names.
    #[must_use]
    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        Self::MissingField(FieldList(fields))
    }

    /// Short name of the error class, used in log records.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "InvalidPayload",
            Self::MissingField(_) => "MissingField",
            Self::InvalidEncoding(_) => "InvalidEncoding",
            Self::Remote(e) => match e.kind() {
                RemoteErrorKind::AlreadyExists => "RemoteConflict",
                RemoteErrorKind::NotFound => "RemoteNotFound",
                RemoteErrorKind::Other => "RemoteOther",
            },
        }
    }
}

/// Configuration and startup errors.
#[derive(Debug, thiserror::Error)]
pub enum BucketGateError {
    /// An unknown storage backend was requested.
    #[error("unknown storage backend: {0} (expected 's3' or 'memory')")]
    UnknownBackend(String),
}

/// Convenience result type for handler pipelines.
pub type HandlerResult<T> = Result<T, HandlerError>;
