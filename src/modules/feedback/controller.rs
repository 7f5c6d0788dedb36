use crate::modules::feedback::model::{FacultyRosterEntry, FeedbackDto};
use crate::modules::feedback::service::FeedbackService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
};
use campusgate_core::{AppError, ErrorResponse};
use campusgate_models::SuccessResponse;
use campusgate_store::Document;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/feedback/faculty/{course_id}/{semester}",
    params(
        ("course_id" = String, Path, description = "Course ID"),
        ("semester" = String, Path, description = "Semester number")
    ),
    responses(
        (status = 200, description = "Faculty teaching each subject", body = Vec<FacultyRosterEntry>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Feedback"
)]
#[instrument(skip(state))]
pub async fn get_faculty_roster(
    State(state): State<AppState>,
    Path((course_id, semester)): Path<(String, String)>,
) -> Result<Json<Vec<FacultyRosterEntry>>, AppError> {
    Ok(Json(
        FeedbackService::compose_faculty_roster(state.store.as_ref(), &course_id, &semester)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/feedback/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Feedback submitted by the student", body = Vec<FeedbackDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Feedback"
)]
#[instrument(skip(state))]
pub async fn get_student_feedback(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        FeedbackService::list_for_student(state.store.as_ref(), &student_id).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackDto,
    responses(
        (status = 200, description = "Feedback stored", body = SuccessResponse),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Feedback"
)]
#[instrument(skip(state, feedback))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    ValidatedJson(feedback): ValidatedJson<FeedbackDto>,
) -> Result<Json<SuccessResponse>, AppError> {
    FeedbackService::submit(state.store.as_ref(), feedback).await?;
    Ok(Json(SuccessResponse::ok()))
}
