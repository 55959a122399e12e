//! [`StorageBackend`] implementation over the AWS SDK S3 client.

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use bucketgate_core::{BucketGateConfig, RemoteError, StorageBackend};
use bytes::Bytes;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::from_sdk_error;

/// Region in which buckets are created without a location constraint.
const DEFAULT_S3_REGION: &str = "us-east-1";

static SHARED: OnceCell<Arc<S3Storage>> = OnceCell::const_new();

/// Amazon S3 storage backend.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: Client,
    region: String,
}

impl S3Storage {
    /// Wrap an existing client. `region` decides the bucket location constraint.
    #[must_use]
    pub fn new(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Build a client from the ambient AWS configuration, overridden by
    /// the region, endpoint, and addressing style in `config`.
    pub async fn from_config(config: &BucketGateConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.default_region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.s3_force_path_style);
        if let Some(endpoint) = &config.s3_endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        debug!(
            region = %config.default_region,
            endpoint = ?config.s3_endpoint_url,
            path_style = config.s3_force_path_style,
            "S3 client configured"
        );
        Self::new(Client::from_conf(builder.build()), &config.default_region)
    }

    /// The process-wide instance, built on first use and reused afterwards.
    ///
    /// Later calls ignore `config`.
    pub async fn shared(config: &BucketGateConfig) -> Arc<Self> {
        SHARED
            .get_or_init(|| async { Arc::new(Self::from_config(config).await) })
            .await
            .clone()
    }

    fn bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        (self.region != DEFAULT_S3_REGION).then(|| {
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build()
        })
    }
}

#[async_trait]
impl StorageBackend for S3Storage {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn create_container(&self, name: &str) -> Result<(), RemoteError> {
        debug!(bucket = %name, region = %self.region, "create_bucket");
        self.client
            .create_bucket()
            .bucket(name)
            .set_create_bucket_configuration(self.bucket_configuration())
            .send()
            .await
            .map_err(|e| from_sdk_error(&e))?;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), RemoteError> {
        debug!(bucket = %bucket, key = %key, size = data.len(), "put_object");
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_content_type(content_type.map(ToOwned::to_owned))
            .send()
            .await
            .map_err(|e| from_sdk_error(&e))?;
        Ok(())
    }
}
