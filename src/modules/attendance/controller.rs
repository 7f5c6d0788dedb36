use crate::modules::attendance::model::{
    AttendanceBatch, AttendanceOverallResponse, AttendanceParams,
};
use crate::modules::attendance::service::AttendanceService;
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
    path = "/api/attendance",
    params(AttendanceParams),
    responses(
        (status = 200, description = "Attendance rows of the student", body = Vec<Object>),
        (status = 400, description = "studentId missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    Query(params): Query<AttendanceParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let student_id = require(params.student_id.as_deref(), "studentId")?;
    Ok(Json(
        AttendanceService::get_attendance(state.store.as_ref(), student_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendanceBatch,
    responses(
        (status = 200, description = "Attendance saved", body = SuccessResponse),
        (status = 400, description = "Empty or invalid records", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(state, batch))]
pub async fn record_attendance(
    State(state): State<AppState>,
    ValidatedJson(batch): ValidatedJson<AttendanceBatch>,
) -> Result<Json<SuccessResponse>, AppError> {
    AttendanceService::record_attendance(state.store.as_ref(), batch.records).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/api/attendance-overall/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Whole percentage, or \"--\" without records", body = AttendanceOverallResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance_overall(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<AttendanceOverallResponse>, AppError> {
    let overall = AttendanceService::overall(state.store.as_ref(), &student_id).await?;
    Ok(Json(AttendanceOverallResponse { overall }))
}
