//! Directory creation through marker objects.

use http::StatusCode;
use tracing::info;

use crate::envelope::{ParsedRequest, RequestEnvelope, parse_envelope};
use crate::error::{HandlerResult, RemoteError, RemoteErrorKind};
use crate::handler::StorageHandlers;
use crate::operations::StorageOperation;
use crate::path::{marker_key, normalize_directory};
use crate::response::ResponseEnvelope;
use crate::validation::FieldValidator;

use super::{log_remote_failure, rejected};

/// Validated input of a create-directory request, directory normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CreateDirectoryInput {
    bucket: String,
    directory: String,
}

impl CreateDirectoryInput {
    fn from_request(request: &ParsedRequest) -> HandlerResult<Self> {
        let mut fields = FieldValidator::new(request);
        let bucket = fields.required("bucket");
        let directory = fields.required("directorio");
        fields.finish()?;
        Ok(Self {
            bucket: bucket.to_owned(),
            directory: normalize_directory(directory),
        })
    }
}

impl StorageHandlers {
    /// Create a directory by writing an empty `<dir>/_placeholder` object.
    ///
    /// Writing the marker is idempotent: repeating the call succeeds again.
    ///
    /// - `200` when the marker was written;
    /// - `404` when the container does not exist;
    /// - `400` for request errors and any other remote failure.
    pub async fn create_directory(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        const OP: StorageOperation = StorageOperation::CreateDirectory;
        self.log_event(OP, envelope);

        let input =
            match parse_envelope(envelope).and_then(|r| CreateDirectoryInput::from_request(&r)) {
                Ok(input) => input,
                Err(err) => return rejected(OP, &err),
            };

        let key = marker_key(&input.directory);
        match self.storage.put_marker(&input.bucket, &key).await {
            Ok(()) => {
                info!(bucket = %input.bucket, key = %key, "directory marker created");
                ResponseEnvelope::ok(format!(
                    "directory '{}' created successfully in bucket '{}'",
                    input.directory, input.bucket
                ))
            }
            Err(e) => {
                log_remote_failure(OP, &input.bucket, &e);
                remote_error_response(&input.bucket, &e)
            }
        }
    }
}

/// Map a failed marker write to a response.
fn remote_error_response(bucket: &str, err: &RemoteError) -> ResponseEnvelope {
    match err.kind() {
        RemoteErrorKind::NotFound => ResponseEnvelope::error(
            StatusCode::NOT_FOUND,
            format!("container '{bucket}' does not exist"),
        ),
        RemoteErrorKind::AlreadyExists | RemoteErrorKind::Other => {
            ResponseEnvelope::error(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::HandlerConfig;
    use crate::ops::test_support::{error_text, failing_handlers, memory_handlers, message_text};
    use crate::storage::StorageBackend;

    #[tokio::test]
    async fn test_should_create_directory_marker() {
        let (storage, handlers) = memory_handlers(HandlerConfig::default());
        storage.create_container("b-1").await.unwrap();
        let envelope = RequestEnvelope::from_value(json!({"bucket": "b-1", "directorio": "photos"}));

        let response = handlers.create_directory(&envelope).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            message_text(&response),
            "directory 'photos/' created successfully in bucket 'b-1'"
        );
        let marker = storage.object("b-1", "photos/_placeholder").unwrap();
        assert!(marker.data.is_empty());
    }

    #[tokio::test]
    async fn test_should_not_duplicate_trailing_separator() {
        let (storage, handlers) = memory_handlers(HandlerConfig::default());
        storage.create_container("b-1").await.unwrap();
        let envelope =
            RequestEnvelope::from_text(r#"{"bucket": "b-1", "directorio": "a/b/"}"#);

        let response = handlers.create_directory(&envelope).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(storage.keys("b-1"), vec!["a/b/_placeholder"]);
    }

    #[tokio::test]
    async fn test_should_be_idempotent() {
        let (storage, handlers) = memory_handlers(HandlerConfig::default());
        storage.create_container("b-1").await.unwrap();
        let envelope = RequestEnvelope::from_value(json!({"bucket": "b-1", "directorio": "docs"}));

        let first = handlers.create_directory(&envelope).await;
        let second = handlers.create_directory(&envelope).await;

        assert_eq!(first.status_code, 200);
        assert_eq!(second.status_code, 200);
        assert_eq!(storage.keys("b-1").len(), 1);
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_missing_bucket() {
        let (_, handlers) = memory_handlers(HandlerConfig::default());
        let envelope =
            RequestEnvelope::from_value(json!({"bucket": "ghost", "directorio": "docs"}));

        let response = handlers.create_directory(&envelope).await;

        assert_eq!(response.status_code, 404);
        assert_eq!(error_text(&response), "container 'ghost' does not exist");
    }

    #[tokio::test]
    async fn test_should_return_bad_request_on_other_remote_error() {
        let (_, handlers) = failing_handlers("AccessDenied");
        let envelope = RequestEnvelope::from_value(json!({"bucket": "b", "directorio": "d"}));

        let response = handlers.create_directory(&envelope).await;

        assert_eq!(response.status_code, 400);
        assert!(error_text(&response).contains("AccessDenied"));
    }

    #[tokio::test]
    async fn test_should_name_each_missing_field() {
        let (storage, handlers) = failing_handlers("InternalError");
        let complete = json!({"bucket": "b", "directorio": "d"});

        for field in StorageOperation::CreateDirectory.required_fields() {
            for replacement in [None, Some(json!(""))] {
                let mut body = complete.clone();
                let map = body.as_object_mut().unwrap();
                match replacement {
                    None => {
                        map.remove(*field);
                    }
                    Some(value) => {
                        map.insert((*field).to_owned(), value);
                    }
                }

                let response = handlers
                    .create_directory(&RequestEnvelope::from_value(body))
                    .await;

                assert_eq!(response.status_code, 400);
                assert_eq!(
                    error_text(&response),
                    format!("missing required parameter(s) in body: '{field}'")
                );
            }
        }
        assert_eq!(storage.calls(), 0);
    }
}
