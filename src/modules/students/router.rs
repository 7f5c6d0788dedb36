use crate::modules::students::controller::{
    create_student, delete_student, filter_students, get_section_roster, list_students,
    replace_student, upload_photo,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes mounted under `/api/students`.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(filter_students))
        .route("/roster", get(get_section_roster))
}

/// Record management routes mounted at the root.
pub fn init_student_records_router() -> Router<AppState> {
    Router::new()
        .route("/students", post(create_student).get(list_students))
        .route(
            "/students/{student_id}",
            put(replace_student).delete(delete_student),
        )
        .route("/upload-photo/{student_id}", post(upload_photo))
}
