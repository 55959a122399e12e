//! Request envelope parsing.
//!
//! A gateway hands each invocation a [`RequestEnvelope`] whose `body` may
//! arrive in two shapes: already decoded into a JSON object, or as a string
//! holding a JSON document (proxy integration). [`RawBody`] models those
//! shapes explicitly and [`parse_envelope`] resolves them into a single
//! [`ParsedRequest`] so that later pipeline stages see one type only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{HandlerError, HandlerResult};

/// Body text assumed when the envelope carries no body at all.
const EMPTY_BODY: &str = "{}";

/// The envelope a gateway passes to a handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// The request body, in whatever shape the gateway produced.
    #[serde(default)]
    pub body: Option<Value>,
    /// Remaining gateway attributes (path, headers, request context...).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RequestEnvelope {
    /// Envelope whose body is a JSON-encoded string.
    #[must_use]
    pub fn from_text(body: impl Into<String>) -> Self {
        Self {
            body: Some(Value::String(body.into())),
            attributes: Map::new(),
        }
    }

    /// Envelope whose body is an already-decoded JSON value.
    #[must_use]
    pub fn from_value(body: Value) -> Self {
        Self {
            body: Some(body),
            attributes: Map::new(),
        }
    }

    /// Resolve the body into its tagged shape.
    #[must_use]
    pub fn raw_body(&self) -> RawBody<'_> {
        RawBody::from(self.body.as_ref())
    }
}

/// The shapes an envelope body can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawBody<'a> {
    /// No body, or an explicit JSON `null`.
    Absent,
    /// Already a JSON object.
    Structured(&'a Map<String, Value>),
    /// A string expected to contain a JSON document.
    Text(&'a str),
    /// Any other JSON value (number, array, boolean).
    Other(&'a Value),
}

impl<'a> From<Option<&'a Value>> for RawBody<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Object(map)) => Self::Structured(map),
            Some(Value::String(text)) => Self::Text(text),
            Some(other) => Self::Other(other),
        }
    }
}

/// A request body normalized into a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRequest(Map<String, Value>);

impl ParsedRequest {
    /// Wrap an already-decoded JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Number of fields in the request.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the request has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Normalize an envelope into a [`ParsedRequest`].
///
/// # Errors
///
/// Returns [`HandlerError::InvalidPayload`] when the body text is not valid
/// JSON, or when the body does not describe a JSON object.
///
/// # Examples
///
/// ```
/// use bucketgate_core::envelope::{RequestEnvelope, parse_envelope};
///
/// let envelope = RequestEnvelope::from_text(r#"{"bucket": "my-bucket"}"#);
/// let request = parse_envelope(&envelope).unwrap();
/// assert_eq!(request.get("bucket").and_then(|v| v.as_str()), Some("my-bucket"));
/// ```
pub fn parse_envelope(envelope: &RequestEnvelope) -> HandlerResult<ParsedRequest> {
    match envelope.raw_body() {
        RawBody::Structured(map) => Ok(ParsedRequest::new(map.clone())),
        RawBody::Absent => parse_text(EMPTY_BODY),
        RawBody::Text(text) => parse_text(text),
        RawBody::Other(value) => Err(HandlerError::InvalidPayload(format!(
            "expected a JSON object or a JSON-encoded string, got {}",
            json_type_name(value)
        ))),
    }
}

fn parse_text(text: &str) -> HandlerResult<ParsedRequest> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(ParsedRequest::new(map)),
        Ok(other) => Err(HandlerError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(HandlerError::InvalidPayload(e.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
