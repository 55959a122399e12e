//! File upload.

use bytes::Bytes;
use http::StatusCode;
use tracing::info;

use crate::envelope::{ParsedRequest, RequestEnvelope, parse_envelope};
use crate::error::{HandlerResult, RemoteError, RemoteErrorKind};
use crate::handler::StorageHandlers;
use crate::operations::StorageOperation;
use crate::path::{normalize_directory, object_key};
use crate::payload::decode_base64;
use crate::response::ResponseEnvelope;
use crate::validation::FieldValidator;

use super::{log_remote_failure, rejected};

/// Validated and decoded input of an upload-file request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UploadFileInput {
    bucket: String,
    /// Normalized directory; empty means the container root.
    directory: String,
    file_name: String,
    data: Bytes,
}

impl UploadFileInput {
    fn from_request(request: &ParsedRequest) -> HandlerResult<Self> {
        let mut fields = FieldValidator::new(request);
        let bucket = fields.required("bucket");
        let directory = fields.optional("directorio");
        let file_name = fields.required("nombreArchivo");
        let encoded = fields.required("archivoBase64");
        fields.finish()?;

        let directory = normalize_directory(directory);
        let data = decode_base64(encoded)?;
        Ok(Self {
            bucket: bucket.to_owned(),
            directory,
            file_name: file_name.to_owned(),
            data,
        })
    }

    fn key(&self) -> String {
        object_key(&self.directory, &self.file_name)
    }
}

impl StorageHandlers {
    /// Upload a Base64-encoded file to `<directorio><nombreArchivo>`.
    ///
    /// The configured upload content type, if any, is attached to the object.
    ///
    /// - `200` when the object was stored;
    /// - `404` when the container does not exist;
    /// - `400` for request errors (fields, JSON, Base64);
    /// - `500` for any other remote failure.
    pub async fn upload_file(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        const OP: StorageOperation = StorageOperation::UploadFile;
        self.log_event(OP, envelope);

        let input = match parse_envelope(envelope).and_then(|r| UploadFileInput::from_request(&r))
        {
            Ok(input) => input,
            Err(err) => return rejected(OP, &err),
        };

        let key = input.key();
        let size = input.data.len();
        let result = self
            .storage
            .put_object(
                &input.bucket,
                &key,
                input.data,
                self.config.upload_content_type.as_deref(),
            )
            .await;

        match result {
            Ok(()) => {
                info!(bucket = %input.bucket, key = %key, size, "file uploaded");
                ResponseEnvelope::ok(format!(
                    "file '{}' uploaded to '{}/{}'",
                    input.file_name, input.bucket, input.directory
                ))
            }
            Err(e) => {
                log_remote_failure(OP, &input.bucket, &e);
                remote_error_response(&input.bucket, &e)
            }
        }
    }
}

/// Map a failed upload to a response.
fn remote_error_response(bucket: &str, err: &RemoteError) -> ResponseEnvelope {
    match err.kind() {
        RemoteErrorKind::NotFound => ResponseEnvelope::error(
            StatusCode::NOT_FOUND,
            format!("container '{bucket}' does not exist"),
        ),
        RemoteErrorKind::AlreadyExists | RemoteErrorKind::Other => ResponseEnvelope::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("error uploading to storage: {err}"),
        ),
    }
}
