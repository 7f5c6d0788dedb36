use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{Json, extract::State};
use campusgate_core::errors::require;
use campusgate_core::{AppError, ErrorResponse};
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Student found", body = LoginResponse),
        (status = 400, description = "userId missing", body = ErrorResponse),
        (status = 401, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user_id = require(request.user_id.as_deref(), "userId")?;
    let response = AuthService::login(state.store.as_ref(), user_id).await?;
    Ok(Json(response))
}
