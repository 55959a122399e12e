//! BucketGate configuration.
//!
//! [`BucketGateConfig`] holds everything the gateway binary needs and is
//! loaded from environment variables. [`HandlerConfig`] is the slice of it
//! the request handlers consume.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::BucketGateError;

/// Which storage backend serves the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Amazon S3 (or an S3-compatible endpoint).
    #[default]
    S3,
    /// Process-local in-memory store.
    Memory,
}

impl StorageBackendKind {
    /// Backend name as used in configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackendKind {
    type Err = BucketGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(Self::S3),
            "memory" | "mem" => Ok(Self::Memory),
            _ => Err(BucketGateError::UnknownBackend(s.to_owned())),
        }
    }
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options consumed by the request handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct HandlerConfig {
    /// Content type attached to uploaded files; unset leaves it to the store.
    #[builder(default, setter(strip_option, into))]
    pub upload_content_type: Option<String>,

    /// Log every incoming envelope at `debug` level.
    #[builder(default = false)]
    pub log_events: bool,
}

/// Global BucketGate configuration.
///
/// # Examples
///
/// ```
/// use bucketgate_core::config::{BucketGateConfig, StorageBackendKind};
///
/// let config = BucketGateConfig::default();
/// assert_eq!(config.gateway_listen, "0.0.0.0:4566");
/// assert_eq!(config.storage_backend, StorageBackendKind::S3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BucketGateConfig {
    /// Bind address for the gateway server.
    #[builder(default = String::from("0.0.0.0:4566"))]
    pub gateway_listen: String,

    /// AWS region used by the S3 client.
    #[builder(default = String::from("us-east-1"))]
    pub default_region: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Storage backend serving the handlers.
    #[builder(default)]
    pub storage_backend: StorageBackendKind,

    /// Custom S3 endpoint (e.g. a LocalStack instance).
    #[builder(default, setter(strip_option, into))]
    pub s3_endpoint_url: Option<String>,

    /// Use path-style S3 addressing.
    #[builder(default = false)]
    pub s3_force_path_style: bool,

    /// Content type attached to uploaded files.
    #[builder(default, setter(strip_option, into))]
    pub upload_content_type: Option<String>,

    /// Log every incoming envelope at `debug` level.
    #[builder(default = false)]
    pub log_events: bool,
}

impl Default for BucketGateConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BucketGateConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:4566` |
    /// | `DEFAULT_REGION` (or `AWS_REGION`) | `us-east-1` |
    /// | `LOG_LEVEL` | `info` |
    /// | `STORAGE_BACKEND` | `s3` |
    /// | `S3_ENDPOINT_URL` | *(unset)* |
    /// | `S3_FORCE_PATH_STYLE` | `false` |
    /// | `UPLOAD_CONTENT_TYPE` | *(unset)* |
    /// | `LOG_EVENTS` | `false` |
    ///
    /// # Errors
    ///
    /// Returns [`BucketGateError::UnknownBackend`] for an unrecognized
    /// `STORAGE_BACKEND`.
    pub fn from_env() -> Result<Self, BucketGateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BucketGateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = non_empty("DEFAULT_REGION").or_else(|| non_empty("AWS_REGION")) {
            config.default_region = v;
        }
        if let Some(v) = non_empty("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = non_empty("STORAGE_BACKEND") {
            config.storage_backend = v.parse()?;
        }
        config.s3_endpoint_url = non_empty("S3_ENDPOINT_URL");
        if let Some(v) = non_empty("S3_FORCE_PATH_STYLE") {
            config.s3_force_path_style = parse_bool(&v);
        }
        config.upload_content_type = non_empty("UPLOAD_CONTENT_TYPE");
        if let Some(v) = non_empty("LOG_EVENTS") {
            config.log_events = parse_bool(&v);
        }

        Ok(config)
    }

    /// The options handed to the request handlers.
    #[must_use]
    pub fn handler_config(&self) -> HandlerConfig {
        HandlerConfig {
            upload_content_type: self.upload_content_type.clone(),
            log_events: self.log_events,
        }
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
