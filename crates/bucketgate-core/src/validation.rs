//! Presence checks for request fields.
//!
//! [`FieldValidator`] walks the fields an operation needs, collecting every
//! offending field before failing, so a single response names all of them.
//! Fields are never coerced: a number where text is expected counts as
//! missing.

use serde_json::Value;

use crate::envelope::ParsedRequest;
use crate::error::{HandlerError, HandlerResult};

/// Collects text fields from a [`ParsedRequest`] and records failures.
///
/// # Examples
///
/// ```
/// use bucketgate_core::envelope::{RequestEnvelope, parse_envelope};
/// use bucketgate_core::validation::FieldValidator;
///
/// let request = parse_envelope(&RequestEnvelope::from_text(r#"{"bucket": "b"}"#)).unwrap();
/// let mut fields = FieldValidator::new(&request);
/// let bucket = fields.required("bucket");
/// let directory = fields.optional("directorio");
/// fields.finish().unwrap();
/// assert_eq!((bucket, directory), ("b", ""));
/// ```
#[derive(Debug)]
pub struct FieldValidator<'a> {
    request: &'a ParsedRequest,
    invalid: Vec<&'static str>,
}

impl<'a> FieldValidator<'a> {
    /// Start validating a request.
    #[must_use]
    pub fn new(request: &'a ParsedRequest) -> Self {
        Self {
            request,
            invalid: Vec::new(),
        }
    }

    /// Read a required, non-empty text field.
    ///
    /// Returns an empty string and records the field when it is absent,
    /// empty or not text.
    pub fn required(&mut self, field: &'static str) -> &'a str {
        let request = self.request;
        match request.get(field) {
            Some(Value::String(text)) if !text.is_empty() => text,
            _ => {
                self.invalid.push(field);
                ""
            }
        }
    }

    /// Read an optional text field, defaulting to an empty string.
    ///
    /// Absent and `null` values yield the default; a present value that is
    /// not text is recorded like a missing required field.
    pub fn optional(&mut self, field: &'static str) -> &'a str {
        let request = self.request;
        match request.get(field) {
            None | Some(Value::Null) => "",
            Some(Value::String(text)) => text,
            Some(_) => {
                self.invalid.push(field);
                ""
            }
        }
    }

    /// Finish validation.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::MissingField`] naming every recorded field, in
    /// the order they were read.
    pub fn finish(self) -> HandlerResult<()> {
        if self.invalid.is_empty() {
            Ok(())
        } else {
            Err(HandlerError::missing_fields(self.invalid))
        }
    }
}
