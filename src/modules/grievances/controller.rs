use crate::modules::grievances::model::{CreateGrievanceDto, Grievance, GrievanceCreated};
use crate::modules::grievances::service::GrievanceService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campusgate_core::{AppError, ErrorResponse};
use campusgate_store::Document;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/grievances/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Grievances, newest first", body = Vec<Grievance>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Grievances"
)]
#[instrument(skip(state))]
pub async fn get_grievances(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        GrievanceService::list(state.store.as_ref(), &student_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/grievances",
    request_body = CreateGrievanceDto,
    responses(
        (status = 201, description = "Grievance submitted", body = GrievanceCreated),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Grievances"
)]
#[instrument(skip(state, dto))]
pub async fn create_grievance(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGrievanceDto>,
) -> Result<(StatusCode, Json<GrievanceCreated>), AppError> {
    let grievance = GrievanceService::create(state.store.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(GrievanceCreated {
            success: true,
            grievance,
        }),
    ))
}
