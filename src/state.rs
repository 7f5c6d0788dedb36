use std::sync::Arc;

use anyhow::Context;
use aws_config::{BehaviorVersion, Region};
use campusgate_config::{
    CorsConfig, ObjectStoreBackend, ObjectStoreConfig, RateLimitConfig, StoreBackend, StoreConfig,
};
use campusgate_core::{LocalObjectStore, ObjectStore, S3ObjectStore, UploadLimits};
use campusgate_store::{DocumentStore, DynamoStore, DynamoStoreOptions, MemoryStore};
use tracing::info;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    /// Upper bound on optimistic-concurrency attempts per request.
    pub cas_max_attempts: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            objects,
            cors_config: CorsConfig::default(),
            rate_limit_config: RateLimitConfig::default(),
            cas_max_attempts: StoreConfig::default().cas_max_attempts,
        }
    }
}

async fn load_sdk_config(region: &str) -> aws_config::SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

async fn init_document_store(config: &StoreConfig) -> Arc<dyn DocumentStore> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::DynamoDb => {
            info!(region = %config.region, endpoint = ?config.endpoint, "Using DynamoDB document store");
            let sdk_config = load_sdk_config(&config.region).await;
            Arc::new(DynamoStore::new(
                &sdk_config,
                DynamoStoreOptions {
                    region: Some(config.region.clone()),
                    endpoint: config.endpoint.clone(),
                    table_prefix: config.table_prefix.clone(),
                },
            ))
        }
    }
}

async fn init_object_store(
    config: &ObjectStoreConfig,
    region: &str,
) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let limits = UploadLimits {
        max_bytes: config.max_upload_bytes,
        ..UploadLimits::default()
    };

    match config.backend {
        ObjectStoreBackend::Local => {
            tokio::fs::create_dir_all(&config.local_dir)
                .await
                .with_context(|| format!("creating {}", config.local_dir.display()))?;
            info!(dir = %config.local_dir.display(), "Using local object store");
            Ok(Arc::new(LocalObjectStore::with_limits(
                config.local_dir.clone(),
                config.public_base_url.clone(),
                limits,
            )))
        }
        ObjectStoreBackend::S3 => {
            info!(bucket = %config.bucket, "Using S3 object store");
            let sdk_config = load_sdk_config(region).await;
            Ok(Arc::new(S3ObjectStore::new(
                &sdk_config,
                config.bucket.clone(),
                region.to_string(),
                limits,
            )))
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let store_config = StoreConfig::from_env();
    let object_config = ObjectStoreConfig::from_env();

    Ok(AppState {
        store: init_document_store(&store_config).await,
        objects: init_object_store(&object_config, &store_config.region).await?,
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        cas_max_attempts: store_config.cas_max_attempts,
    })
}
