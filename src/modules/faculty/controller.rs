use crate::modules::faculty::model::{
    FacultyAssignmentParams, FacultyProfileUpdate, FacultyProfileUpdated, PROFILE_UPDATED,
};
use crate::modules::faculty::service::FacultyService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use campusgate_core::errors::require;
use campusgate_core::{AppError, ErrorResponse};
use campusgate_store::Document;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/faculty/{faculty_id}",
    params(("faculty_id" = String, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty record", body = Object),
        (status = 404, description = "Faculty not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(faculty_id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(
        FacultyService::get_faculty(state.store.as_ref(), &faculty_id).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/faculty/{faculty_id}",
    params(("faculty_id" = String, Path, description = "Faculty ID")),
    request_body = FacultyProfileUpdate,
    responses(
        (status = 200, description = "Profile updated", body = FacultyProfileUpdated),
        (status = 400, description = "No valid fields to update", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Faculty"
)]
#[instrument(skip(state, update))]
pub async fn update_faculty_profile(
    State(state): State<AppState>,
    Path(faculty_id): Path<String>,
    ValidatedJson(update): ValidatedJson<FacultyProfileUpdate>,
) -> Result<Json<FacultyProfileUpdated>, AppError> {
    let data = FacultyService::update_profile(state.store.as_ref(), &faculty_id, update).await?;
    Ok(Json(FacultyProfileUpdated {
        success: true,
        message: PROFILE_UPDATED.to_string(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/faculty/feedback/{faculty_id}",
    params(("faculty_id" = String, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Feedback naming the faculty member", body = Vec<Object>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty_feedback(
    State(state): State<AppState>,
    Path(faculty_id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        FacultyService::get_feedback(state.store.as_ref(), &faculty_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/faculty-assignments",
    params(FacultyAssignmentParams),
    responses(
        (status = 200, description = "Matching assignment, {} when none", body = Object),
        (status = 400, description = "Missing query parameter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty_assignment(
    State(state): State<AppState>,
    Query(params): Query<FacultyAssignmentParams>,
) -> Result<Json<Document>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    let semester = require(params.semester.as_deref(), "semester")?;
    let section = require(params.section.as_deref(), "section")?;
    let faculty_id = require(params.faculty_id.as_deref(), "facultyId")?;

    Ok(Json(
        FacultyService::get_assignment(
            state.store.as_ref(),
            course_id,
            semester,
            section,
            faculty_id,
        )
        .await?,
    ))
}
