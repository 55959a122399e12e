//! Conversion of AWS SDK failures into [`RemoteError`]s.
//!
//! Service errors carry an S3 error code (`NoSuchBucket`,
//! `BucketAlreadyOwnedByYou`...) in their metadata, which is passed through
//! unchanged so the handlers can classify it. Failures that never reached
//! the service (connection, timeout, request construction) get a code named
//! after the failure class and the full error chain as message.

use std::error::Error;
use std::fmt;

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use bucketgate_core::RemoteError;

/// Code used when a service error carries no code.
const UNKNOWN_CODE: &str = "Unknown";

/// Convert a modeled or generic service error.
pub(crate) fn from_service_error<E>(err: &E) -> RemoteError
where
    E: ProvideErrorMetadata + fmt::Display,
{
    RemoteError::new(
        err.code().unwrap_or(UNKNOWN_CODE),
        err.message()
            .map_or_else(|| err.to_string(), ToOwned::to_owned),
    )
}

/// Convert any SDK error returned by an operation's `send()`.
pub(crate) fn from_sdk_error<E, R>(err: &SdkError<E, R>) -> RemoteError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: fmt::Debug,
{
    match err {
        SdkError::ServiceError(context) => from_service_error(context.err()),
        other => RemoteError::new(failure_code(other), DisplayErrorContext(other).to_string()),
    }
}

fn failure_code<E, R>(err: &SdkError<E, R>) -> &'static str {
    match err {
        SdkError::ConstructionFailure(_) => "ConstructionFailure",
        SdkError::TimeoutError(_) => "TimeoutError",
        SdkError::DispatchFailure(_) => "DispatchFailure",
        SdkError::ResponseError(_) => "ResponseError",
        _ => UNKNOWN_CODE,
    }
}
