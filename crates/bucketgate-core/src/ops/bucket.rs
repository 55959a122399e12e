//! Container creation.

use http::StatusCode;
use tracing::info;

use crate::envelope::{ParsedRequest, RequestEnvelope, parse_envelope};
use crate::error::{HandlerResult, RemoteError, RemoteErrorKind};
use crate::handler::StorageHandlers;
use crate::operations::StorageOperation;
use crate::response::ResponseEnvelope;
use crate::validation::FieldValidator;

use super::{log_remote_failure, rejected};

/// Validated input of a create-bucket request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CreateBucketInput {
    bucket: String,
}

impl CreateBucketInput {
    fn from_request(request: &ParsedRequest) -> HandlerResult<Self> {
        let mut fields = FieldValidator::new(request);
        let bucket = fields.required("bucket");
        fields.finish()?;
        Ok(Self {
            bucket: bucket.to_owned(),
        })
    }
}

impl StorageHandlers {
    /// Create a storage container.
    ///
    /// - `200` when the container was created;
    /// - `409` when it already exists;
    /// - `400` for request errors and any other remote failure.
    pub async fn create_bucket(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        const OP: StorageOperation = StorageOperation::CreateBucket;
        self.log_event(OP, envelope);

        let input = match parse_envelope(envelope).and_then(|r| CreateBucketInput::from_request(&r))
        {
            Ok(input) => input,
            Err(err) => return rejected(OP, &err),
        };

        match self.storage.create_container(&input.bucket).await {
            Ok(()) => {
                info!(bucket = %input.bucket, "bucket created");
                ResponseEnvelope::ok(format!(
                    "container '{}' created successfully",
                    input.bucket
                ))
            }
            Err(e) => {
                log_remote_failure(OP, &input.bucket, &e);
                remote_error_response(&input.bucket, &e)
            }
        }
    }
}

/// Map a failed container creation to a response.
fn remote_error_response(bucket: &str, err: &RemoteError) -> ResponseEnvelope {
    match err.kind() {
        RemoteErrorKind::AlreadyExists => ResponseEnvelope::error(
            StatusCode::CONFLICT,
            format!("container '{bucket}' already exists"),
        ),
        RemoteErrorKind::NotFound | RemoteErrorKind::Other => {
            ResponseEnvelope::error(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}
