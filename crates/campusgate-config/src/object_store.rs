use std::env;
use std::path::PathBuf;

pub const DEFAULT_PHOTO_BUCKET: &str = "erp-s101";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ObjectStoreBackend {
    #[default]
    Local,
    S3,
}

/// Upload storage settings.
///
/// - `OBJECT_STORE_BACKEND`: `local` or `s3` (default: local)
/// - `PHOTO_BUCKET`: S3 bucket for student photos (default: erp-s101)
/// - `LOCAL_UPLOAD_DIR`: directory for the local backend (default: storage/uploads)
/// - `PUBLIC_BASE_URL`: URL prefix the local backend hands out
/// - `MAX_UPLOAD_BYTES`: default 5 MiB
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectStoreConfig {
    pub backend: ObjectStoreBackend,
    pub bucket: String,
    pub local_dir: PathBuf,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            backend: ObjectStoreBackend::Local,
            bucket: DEFAULT_PHOTO_BUCKET.to_string(),
            local_dir: PathBuf::from("storage/uploads"),
            public_base_url: "http://localhost:3000/uploads".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ObjectStoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: match env::var("OBJECT_STORE_BACKEND")
                .map(|v| v.to_lowercase())
                .as_deref()
            {
                Ok("s3") => ObjectStoreBackend::S3,
                _ => ObjectStoreBackend::Local,
            },
            bucket: env::var("PHOTO_BUCKET").unwrap_or(defaults.bucket),
            local_dir: env::var("LOCAL_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.local_dir),
            public_base_url: env::var("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }
}
