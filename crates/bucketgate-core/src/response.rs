//! Response envelope returned to the gateway.
//!
//! Every handler outcome, success or failure, has the same shape:
//!
//! ```json
//! { "statusCode": 200, "body": "{\"message\":\"...\"}" }
//! ```
//!
//! The `body` is itself a JSON document carrying exactly one of `message`
//! or `error`.

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Decoded form of a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Successful outcome.
    Message {
        /// Human-readable success message.
        message: String,
    },
    /// Failed outcome.
    Error {
        /// Human-readable error description.
        error: String,
    },
}

impl ResponseBody {
    /// The success message, if this is a success body.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message { message } => Some(message),
            Self::Error { .. } => None,
        }
    }

    /// The error description, if this is an error body.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            Self::Message { .. } => None,
        }
    }
}

/// The envelope a handler returns to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status_code: u16,
    /// JSON-encoded [`ResponseBody`].
    pub body: String,
}

impl ResponseEnvelope {
    /// Build an envelope from a status and a decoded body.
    #[must_use]
    pub fn new(status: StatusCode, body: &ResponseBody) -> Self {
        Self {
            status_code: status.as_u16(),
            body: serde_json::to_string(body).expect("JSON serialization of body cannot fail"),
        }
    }

    /// A `200 OK` envelope with a success message.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::OK,
            &ResponseBody::Message {
                message: message.into(),
            },
        )
    }

    /// An error envelope with the given status.
    #[must_use]
    pub fn error(status: StatusCode, error: impl Into<String>) -> Self {
        Self::new(
            status,
            &ResponseBody::Error {
                error: error.into(),
            },
        )
    }

    /// The status code as an [`http::StatusCode`].
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Decode the body document.
    ///
    /// # Errors
    ///
    /// Fails only if the body was not produced by this type.
    pub fn decode_body(&self) -> Result<ResponseBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
