use crate::modules::courses::model::CourseSemesterParams;
use crate::modules::courses::service::{CourseService, parse_semester};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use campusgate_core::errors::require;
use campusgate_core::{AppError, ErrorResponse};
use campusgate_store::Document;
use serde_json::Value;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/coursedetails",
    responses(
        (status = 200, description = "Every course", body = Vec<Object>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_course_details(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(CourseService::list_courses(state.store.as_ref()).await?))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Every course", body = Vec<Object>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(CourseService::list_courses(state.store.as_ref()).await?))
}

#[utoipa::path(
    get,
    path = "/coursedetails/{course_id}",
    params(("course_id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Object),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course_details(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(
        CourseService::get_course(state.store.as_ref(), &course_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/course-sections",
    params(CourseSemesterParams),
    responses(
        (status = 200, description = "Section names", body = Vec<String>),
        (status = 400, description = "courseId or semester missing", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course_sections(
    State(state): State<AppState>,
    Query(params): Query<CourseSemesterParams>,
) -> Result<Json<Value>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    let semester = parse_semester(require(params.semester.as_deref(), "semester")?)?;

    Ok(Json(
        CourseService::get_sections(state.store.as_ref(), course_id, semester).await?,
    ))
}
