//! AWS S3 object storage implementation

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ServerSideEncryption;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};

use super::provider::{ObjectStore, PresignedUrl};

/// Configuration for the S3-backed object store
#[derive(Debug, Clone)]
pub struct S3StoreConfig {
    pub profile: Option<String>,
    pub region: String,
    pub bucket: String,
}

impl S3StoreConfig {
    pub fn new(bucket: String) -> Self {
        Self {
            profile: None,
            region: "us-east-1".to_string(),
            bucket,
        }
    }
}

/// S3-backed object store
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Create a new S3 store client
    pub async fn new(config: S3StoreConfig) -> Result<Self> {
        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        aws_config_loader = aws_config_loader.region(Region::new(config.region));

        let aws_config = aws_config_loader.load().await;
        let client = Client::new(&aws_config);

        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }

    fn expiry(ttl: Duration) -> Result<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(ttl).context("presign ttl out of range")?;
        Ok(Utc::now() + ttl)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .content_disposition("inline")
            .server_side_encryption(ServerSideEncryption::Aes256)
            .send()
            .await
            .with_context(|| format!("Failed to put object {key}"))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("Failed to get object {key}"))?;

        let bytes = response
            .body
            .collect()
            .await
            .context("Failed to collect object body")?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<PresignedUrl> {
        let expires_at = Self::expiry(ttl)?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(ttl).context("invalid presign ttl")?)
            .await
            .with_context(|| format!("Failed to presign download of {key}"))?;

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            expires_at,
        })
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<PresignedUrl> {
        let expires_at = Self::expiry(ttl)?;

        // No SSE header on presigned uploads; bucket-default encryption
        // applies when the client PUTs.
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(PresigningConfig::expires_in(ttl).context("invalid presign ttl")?)
            .await
            .with_context(|| format!("Failed to presign upload of {key}"))?;

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            expires_at,
        })
    }
}
