//! Integration tests for BucketGate server.
//!
//! These tests require a running BucketGate server at `localhost:4566`
//! (override with `GATEWAY_URL`). They are marked `#[ignore]` so they don't
//! run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! STORAGE_BACKEND=memory cargo run -p bucketgate-server &
//! cargo test -p bucketgate-integration -- --ignored
//! ```

use std::sync::Once;

use serde_json::Value;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Base URL of the gateway.
fn gateway_url() -> String {
    std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// A gateway reply: HTTP status and decoded JSON body.
#[derive(Debug)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body.
    pub body: Value,
}

impl Reply {
    /// The `message` field of a success body.
    #[must_use]
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// The `error` field of a failure body.
    #[must_use]
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Create an HTTP client for the gateway.
#[must_use]
pub fn http_client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Send a raw request to a gateway path.
pub async fn send(method: reqwest::Method, path: &str, body: String) -> anyhow::Result<Reply> {
    let response = http_client()
        .request(method, format!("{}{path}", gateway_url()))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await?;
    let status = response.status().as_u16();
    let body = response.json::<Value>().await?;
    tracing::debug!(path, status, %body, "gateway reply");
    Ok(Reply { status, body })
}

/// Call an operation through its HTTP route.
pub async fn call(operation: &str, body: &Value) -> Reply {
    send(reqwest::Method::POST, &format!("/s3/{operation}"), body.to_string())
        .await
        .unwrap_or_else(|e| panic!("failed to call {operation}: {e}"))
}

/// Invoke an operation through its function route, returning the response envelope.
pub async fn invoke(operation: &str, event: &Value) -> Reply {
    send(
        reqwest::Method::POST,
        &format!("/2015-03-31/functions/{operation}/invocations"),
        event.to_string(),
    )
    .await
    .unwrap_or_else(|e| panic!("failed to invoke {operation}: {e}"))
}

/// Create a bucket through the gateway and return its name.
pub async fn create_test_bucket(prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    let reply = call("create-bucket", &serde_json::json!({ "bucket": name })).await;
    assert_eq!(reply.status, 200, "failed to create bucket {name}: {}", reply.body);
    name
}

mod test_bucket;
mod test_directory;
mod test_gateway;
mod test_upload;
