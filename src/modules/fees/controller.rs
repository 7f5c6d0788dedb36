use crate::modules::fees::model::{FeeStructureParams, FeesPaidParams};
use crate::modules::fees::service::FeeService;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use campusgate_core::errors::require;
use campusgate_core::{AppError, ErrorResponse};
use campusgate_store::Document;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/feestructure",
    params(FeeStructureParams),
    responses(
        (status = 200, description = "Fee structure sorted by semester", body = Vec<Object>),
        (status = 400, description = "courseId missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fee_structure(
    State(state): State<AppState>,
    Query(params): Query<FeeStructureParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    Ok(Json(
        FeeService::get_fee_structure(state.store.as_ref(), course_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/feepaid",
    params(FeesPaidParams),
    responses(
        (status = 200, description = "Payments sorted by semester", body = Vec<Object>),
        (status = 400, description = "studentId missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fees_paid(
    State(state): State<AppState>,
    Query(params): Query<FeesPaidParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let student_id = require(params.student_id.as_deref(), "studentId")?;
    Ok(Json(
        FeeService::get_fees_paid(state.store.as_ref(), student_id).await?,
    ))
}
