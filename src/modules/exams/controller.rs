use crate::modules::courses::service::parse_semester;
use crate::modules::exams::model::{
    AdmitCardDownloadedRequest, CourseSemesterParams, ResultsView, SemesterParams,
};
use crate::modules::exams::service::ExamService;
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
    path = "/api/exams/upcoming",
    params(CourseSemesterParams),
    responses(
        (status = 200, description = "Exams of the semester", body = Vec<Object>),
        (status = 400, description = "courseId or semester missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_upcoming_exams(
    State(state): State<AppState>,
    Query(params): Query<CourseSemesterParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    let semester = require(params.semester.as_deref(), "semester")?;
    Ok(Json(
        ExamService::get_upcoming(state.store.as_ref(), course_id, semester).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/exams/admit-card/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Admit cards of the student", body = Vec<Object>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_admit_cards(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        ExamService::get_admit_cards(state.store.as_ref(), &student_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/exams/admit-card/downloaded",
    request_body = AdmitCardDownloadedRequest,
    responses(
        (status = 200, description = "Admit card flagged", body = SuccessResponse),
        (status = 400, description = "studentId or semester missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn mark_admit_card_downloaded(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AdmitCardDownloadedRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    ExamService::mark_admit_card_downloaded(
        state.store.as_ref(),
        &request.student_id,
        request.semester,
    )
    .await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/api/exams/results/{student_id}",
    params(("student_id" = String, Path, description = "Student ID"), SemesterParams),
    responses(
        (status = 200, description = "Subject results and semester summary", body = ResultsView),
        (status = 400, description = "semester missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn get_results(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Query(params): Query<SemesterParams>,
) -> Result<Json<ResultsView>, AppError> {
    let semester = parse_semester(require(params.semester.as_deref(), "semester")?)?;
    Ok(Json(
        ExamService::compose_results_view(state.store.as_ref(), &student_id, semester).await?,
    ))
}
