use crate::modules::placement::model::{ApplyRequest, DrivesParams};
use crate::modules::placement::service::PlacementService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use campusgate_core::errors::require;
use campusgate_core::{AppError, ErrorResponse};
use campusgate_models::SuccessResponse;
use campusgate_store::Document;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/placement/stats/{course_id}",
    params(("course_id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Placement statistics, {} when none", body = Object),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Placement"
)]
#[instrument(skip(state))]
pub async fn get_placement_stats(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(
        PlacementService::get_stats(state.store.as_ref(), &course_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/placement/drives",
    params(DrivesParams),
    responses(
        (status = 200, description = "Placement drives for the course", body = Vec<Object>),
        (status = 400, description = "courseId missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Placement"
)]
#[instrument(skip(state))]
pub async fn get_placement_drives(
    State(state): State<AppState>,
    Query(params): Query<DrivesParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    Ok(Json(
        PlacementService::get_drives(state.store.as_ref(), course_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/placement/profile/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Placement profile", body = Object),
        (status = 404, description = "Placement profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Placement"
)]
#[instrument(skip(state))]
pub async fn get_placement_profile(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(
        PlacementService::get_profile(state.store.as_ref(), &student_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/placement/apply",
    request_body = ApplyRequest,
    responses(
        (status = 200, description = "Application recorded", body = SuccessResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 409, description = "Already applied to this company", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Placement"
)]
#[instrument(skip(state))]
pub async fn apply_for_placement(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ApplyRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    PlacementService::apply(state.store.as_ref(), request).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/api/placement/applications/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Applications of the student", body = Vec<Object>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Placement"
)]
#[instrument(skip(state))]
pub async fn get_placement_applications(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        PlacementService::get_applications(state.store.as_ref(), &student_id).await?,
    ))
}
