use anyhow::anyhow;
use campusgate_core::AppError;
use campusgate_store::{Collection, Document, DocumentStore, Key, QueryEngine};
use tracing::instrument;

pub struct AdminService;

impl AdminService {
    #[instrument(skip(store))]
    pub async fn get_admin(store: &dyn DocumentStore, admin_id: &str) -> Result<Document, AppError> {
        QueryEngine::get_by_key(store, Collection::Admin, &Key::partition(admin_id))
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Admin not found")))
    }
}
