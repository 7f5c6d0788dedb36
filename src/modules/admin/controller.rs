use crate::modules::admin::service::AdminService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use campusgate_core::{AppError, ErrorResponse};
use campusgate_store::Document;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/admin/{admin_id}",
    params(("admin_id" = String, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin record", body = Object),
        (status = 404, description = "Admin not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_admin(
    State(state): State<AppState>,
    Path(admin_id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(
        AdminService::get_admin(state.store.as_ref(), &admin_id).await?,
    ))
}
