//! Object storage for uploaded files.
//!
//! Uploads go through [`ObjectStore::put_object`], which stores the bytes and
//! returns the public URL of the stored object. Two backends exist: a local
//! directory (development and tests) and an S3 bucket.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, instrument};

pub const DEFAULT_MAX_OBJECT_SIZE: usize = 5 * 1024 * 1024;

#[async_trait]
pub trait ObjectStore: fmt::Debug + Send + Sync {
    /// Stores `content` under `key` and returns its public URL.
    async fn put_object(
        &self,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    /// Object exceeds the configured maximum size.
    InvalidFileSize { max_bytes: usize },

    InvalidMimeType {
        received: String,
        allowed: Vec<String>,
    },

    IoError(std::io::Error),

    /// Remote object store rejected the request.
    Backend(String),

    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::InvalidMimeType { received, allowed } => write!(
                f,
                "MIME type '{}' not allowed. Allowed types: {}",
                received,
                allowed.join(", ")
            ),
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::Backend(msg) => write!(f, "Object store error: {}", msg),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Rejects empty keys, traversal and characters outside a conservative set.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Key must not be empty, contain '..', or start with '/'".to_string(),
        ));
    }

    if !key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
    {
        return Err(StorageError::InvalidKey(
            "Key contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Size and content-type limits shared by both backends.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_bytes: usize,
    pub allowed_mime_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_OBJECT_SIZE,
            allowed_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
        }
    }
}

impl UploadLimits {
    pub fn check(&self, key: &str, content: &[u8], content_type: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        if content.len() > self.max_bytes {
            return Err(StorageError::InvalidFileSize {
                max_bytes: self.max_bytes,
            });
        }
        if !self.allowed_mime_types.iter().any(|m| m == content_type) {
            return Err(StorageError::InvalidMimeType {
                received: content_type.to_string(),
                allowed: self.allowed_mime_types.clone(),
            });
        }
        Ok(())
    }
}

/// Writes objects under a directory and serves them from `base_url`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    base_dir: PathBuf,
    base_url: String,
    limits: UploadLimits,
}

impl LocalObjectStore {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_limits(base_dir, base_url, UploadLimits::default())
    }

    pub fn with_limits(base_dir: PathBuf, base_url: String, limits: UploadLimits) -> Self {
        Self {
            base_dir,
            base_url,
            limits,
        }
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    #[instrument(skip(self, content), fields(size = content.len()))]
    async fn put_object(
        &self,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.limits.check(key, &content, content_type)?;

        let file_path = self.base_dir.join(key);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&file_path, &content).await?;

        debug!(path = %file_path.display(), "object written");
        Ok(self.url_for(key))
    }
}

/// Stores objects in an S3 bucket with a public-read ACL.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
    limits: UploadLimits,
}

impl fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .finish()
    }
}

impl S3ObjectStore {
    pub fn new(
        sdk_config: &aws_config::SdkConfig,
        bucket: String,
        region: String,
        limits: UploadLimits,
    ) -> Self {
        let config = aws_sdk_s3::config::Builder::from(sdk_config)
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .build();
        Self {
            client: aws_sdk_s3::Client::from_conf(config),
            bucket,
            region,
            limits,
        }
    }

    pub fn url_for(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, content), fields(bucket = %self.bucket, size = content.len()))]
    async fn put_object(
        &self,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.limits.check(key, &content, content_type)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(content))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("PutObject failed: {e}")))?;

        Ok(self.url_for(key))
    }
}
