use crate::modules::courses::service::parse_semester;
use crate::modules::students::model::{
    CreateStudentDto, PHOTO_CONTENT_TYPE, PHOTO_FIELD, RosterParams, Student, StudentCreated,
    StudentFilterParams, StudentProfileDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use anyhow::anyhow;
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use campusgate_core::errors::require;
use campusgate_core::{AppError, ErrorResponse};
use campusgate_models::{SuccessResponse, UploadResponse};
use campusgate_store::Document;
use tracing::{instrument, warn};

#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student created and given a hostel room", body = StudentCreated),
        (status = 400, description = "Invalid student", body = ErrorResponse),
        (status = 409, description = "Room allocation kept colliding, retry", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<StudentCreated>, AppError> {
    let created =
        StudentService::create_student(state.store.as_ref(), dto, state.cas_max_attempts).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "Every student", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(StudentService::list_students(state.store.as_ref()).await?))
}

#[utoipa::path(
    put,
    path = "/students/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    request_body = StudentProfileDto,
    responses(
        (status = 200, description = "Student replaced", body = Student),
        (status = 400, description = "Invalid student", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn replace_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<StudentProfileDto>,
) -> Result<Json<Student>, AppError> {
    let student =
        StudentService::replace_student(state.store.as_ref(), dto.into_student(student_id)).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/students/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = SuccessResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    StudentService::delete_student(state.store.as_ref(), &student_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Matching students", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn filter_students(
    State(state): State<AppState>,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        StudentService::filter_students(state.store.as_ref(), &params).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/roster",
    params(RosterParams),
    responses(
        (status = 200, description = "Section roster by class roll number", body = Vec<Student>),
        (status = 400, description = "Missing parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_section_roster(
    State(state): State<AppState>,
    Query(params): Query<RosterParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let course_id = require(params.course_id.as_deref(), "courseId")?;
    let semester = parse_semester(require(params.semester.as_deref(), "semester")?)?;
    let section = require(params.section.as_deref(), "section")?;

    Ok(Json(
        StudentService::section_roster(state.store.as_ref(), course_id, semester, section)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/upload-photo/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    request_body(content_type = "multipart/form-data", description = "Image in the `photo` field"),
    responses(
        (status = 200, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or(PHOTO_CONTENT_TYPE)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(anyhow!("Failed to read upload: {e}")))?;

        let url = StudentService::upload_photo(
            state.objects.as_ref(),
            &student_id,
            bytes.to_vec(),
            &content_type,
        )
        .await?;
        return Ok(Json(UploadResponse { url }));
    }

    warn!("upload without a photo field");
    Err(AppError::bad_request(anyhow!("No file uploaded.")))
}
