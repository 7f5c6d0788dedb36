use crate::modules::academics::model::{
    ResourceFilterParams, SubjectByCodeParams, SubjectFilterParams,
};
use crate::modules::academics::service::AcademicsService;
use crate::modules::courses::service::parse_semester;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use campusgate_core::errors::require;
use campusgate_core::{AppError, ErrorResponse};
use campusgate_store::Document;
use tracing::instrument;

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[utoipa::path(
    get,
    path = "/api/subjects",
    params(SubjectFilterParams),
    responses(
        (status = 200, description = "Subjects of the course", body = Vec<Object>),
        (status = 400, description = "courseId missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    Query(params): Query<SubjectFilterParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    let subjects = AcademicsService::get_subjects(
        state.store.as_ref(),
        course_id,
        optional(&params.branch),
        optional(&params.specialization),
        optional(&params.semester),
    )
    .await?;
    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/subjects/by-code",
    params(SubjectByCodeParams),
    responses(
        (status = 200, description = "Subject, or {} when unknown", body = Object),
        (status = 400, description = "courseId or subjectCode missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn get_subject_by_code(
    State(state): State<AppState>,
    Query(params): Query<SubjectByCodeParams>,
) -> Result<Json<Document>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    let subject_code = require(params.subject_code.as_deref(), "subjectCode")?;
    Ok(Json(
        AcademicsService::get_subject_by_code(state.store.as_ref(), course_id, subject_code)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/circulars/{course_id}",
    params(("course_id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Circulars, newest first", body = Vec<Object>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn get_circulars(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        AcademicsService::get_circulars(state.store.as_ref(), &course_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/resources",
    params(ResourceFilterParams),
    responses(
        (status = 200, description = "Active resources", body = Vec<Object>),
        (status = 400, description = "courseId, branch or semester missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Academics"
)]
#[instrument(skip(state))]
pub async fn get_resources(
    State(state): State<AppState>,
    Query(params): Query<ResourceFilterParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    let branch = require(params.branch.as_deref(), "branch")?;
    let semester = parse_semester(require(params.semester.as_deref(), "semester")?)?;

    let resources = AcademicsService::get_resources(
        state.store.as_ref(),
        course_id,
        branch,
        semester,
        optional(&params.section),
        optional(&params.specialization),
    )
    .await?;
    Ok(Json(resources))
}
