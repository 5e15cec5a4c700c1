use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A time-limited, pre-authorized link to a stored object. The URL stops
/// granting access after `expires_at`.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Trait for object storage backends
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under a key
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Fetch the bytes stored under a key
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Mint a time-limited download URL for a stored object
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<PresignedUrl>;

    /// Mint a time-limited upload URL for a key the client will write
    async fn presign_put(&self, key: &str, content_type: &str, ttl: Duration)
        -> Result<PresignedUrl>;
}
