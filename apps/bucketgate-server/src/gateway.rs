//! Gateway service exposing the storage handlers over HTTP.
//!
//! Two invocation styles are routed to the same handlers:
//!
//! - `POST /s3/<operation>`: the HTTP body is the request body, and the
//!   response envelope becomes the HTTP status and JSON body.
//! - `POST /2015-03-31/functions/<operation>/invocations`: the HTTP body is a
//!   complete event envelope, and the reply is `200` carrying the response
//!   envelope itself, as a function runtime would return it.
//!
//! Health checks (`/_health`, `/health`) are answered at the gateway level.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use bucketgate_core::error::HandlerError;
use bucketgate_core::{RequestEnvelope, ResponseEnvelope, StorageHandlers, StorageOperation};
use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{debug, warn};

/// Response body type produced by the gateway.
pub type GatewayBody = Full<Bytes>;

/// Path prefix of direct HTTP operation routes.
const HTTP_PREFIX: &str = "/s3/";

/// Path prefix and suffix of function-invocation routes.
const INVOKE_PREFIX: &str = "/2015-03-31/functions/";
const INVOKE_SUFFIX: &str = "/invocations";

/// Header carrying the per-request identifier.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// How an operation was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Invocation {
    Http,
    Function,
}

/// Result of routing a request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Health,
    Operation(StorageOperation, Invocation),
    MethodNotAllowed,
    NotFound,
}

impl Route {
    fn resolve(method: &Method, path: &str) -> Self {
        if is_health_check(path) {
            return if *method == Method::GET {
                Self::Health
            } else {
                Self::MethodNotAllowed
            };
        }

        let target = operation_target(path);
        let Some((name, invocation)) = target else {
            return Self::NotFound;
        };
        let Some(op) = StorageOperation::from_name(name) else {
            return Self::NotFound;
        };
        if *method == Method::POST {
            Self::Operation(op, invocation)
        } else {
            Self::MethodNotAllowed
        }
    }
}

/// Extract the operation name and invocation style from a path.
fn operation_target(path: &str) -> Option<(&str, Invocation)> {
    if let Some(rest) = path.strip_prefix(HTTP_PREFIX) {
        return Some((rest.trim_end_matches('/'), Invocation::Http));
    }
    path.strip_prefix(INVOKE_PREFIX)
        .and_then(|rest| rest.strip_suffix(INVOKE_SUFFIX))
        .map(|name| (name, Invocation::Function))
}

/// Check if the request path is a health check probe.
fn is_health_check(path: &str) -> bool {
    path == "/_health" || path == "/health"
}

/// Hyper service routing requests to [`StorageHandlers`].
#[derive(Debug, Clone)]
pub struct GatewayService {
    handlers: StorageHandlers,
}

impl GatewayService {
    /// Create a gateway over the given handlers.
    pub fn new(handlers: StorageHandlers) -> Self {
        Self { handlers }
    }

    /// Route and answer one request whose body has already been read.
    pub async fn respond(
        &self,
        method: &Method,
        path: &str,
        body: Bytes,
    ) -> http::Response<GatewayBody> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let route = Route::resolve(method, path);
        debug!(request_id = %request_id, %method, path, ?route, "routing request");

        let mut response = match route {
            Route::Health => self.health_check_response(),
            Route::Operation(op, Invocation::Http) => {
                let envelope = match String::from_utf8(body.to_vec()) {
                    Ok(text) => self.handlers.handle(op, &RequestEnvelope::from_text(text)).await,
                    Err(e) => invalid_payload(&e),
                };
                envelope_response(&envelope)
            }
            Route::Operation(op, Invocation::Function) => {
                let envelope = match serde_json::from_slice::<RequestEnvelope>(&body) {
                    Ok(event) => self.handlers.handle(op, &event).await,
                    Err(e) => invalid_payload(&e),
                };
                json_response(StatusCode::OK, envelope_json(&envelope))
            }
            Route::MethodNotAllowed => error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                &format!("method {method} not allowed on {path}"),
            ),
            Route::NotFound => {
                error_response(StatusCode::NOT_FOUND, &format!("no route for {path}"))
            }
        };

        if let Ok(hv) = http::HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, hv);
        }
        response
    }

    fn health_check_response(&self) -> http::Response<GatewayBody> {
        let body = serde_json::json!({
            "status": "running",
            "storage": self.handlers.storage().name(),
        });
        json_response(StatusCode::OK, body.to_string())
    }
}

impl Service<http::Request<Incoming>> for GatewayService {
    type Response = http::Response<GatewayBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let gateway = self.clone();
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    warn!(error = %e, "failed to read request body");
                    return Ok(error_response(
                        StatusCode::BAD_REQUEST,
                        &format!("failed to read request body: {e}"),
                    ));
                }
            };
            Ok(gateway.respond(&parts.method, parts.uri.path(), body).await)
        })
    }
}

/// The 400 envelope for a body that cannot be turned into a request.
fn invalid_payload(err: &impl std::fmt::Display) -> ResponseEnvelope {
    let err = HandlerError::InvalidPayload(err.to_string());
    ResponseEnvelope::error(StatusCode::BAD_REQUEST, err.to_string())
}

/// Serialize a response envelope as a function result.
fn envelope_json(envelope: &ResponseEnvelope) -> String {
    serde_json::to_string(envelope).expect("JSON serialization of envelope cannot fail")
}

/// Convert a response envelope into an HTTP response carrying its status and body.
fn envelope_response(envelope: &ResponseEnvelope) -> http::Response<GatewayBody> {
    json_response(envelope.status(), envelope.body.clone())
}

fn error_response(status: StatusCode, message: &str) -> http::Response<GatewayBody> {
    json_response(status, serde_json::json!({ "error": message }).to_string())
}

fn json_response(status: StatusCode, body: String) -> http::Response<GatewayBody> {
    http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("valid JSON response")
}
