use crate::modules::feedback::controller::{
    get_faculty_roster, get_student_feedback, submit_feedback,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_feedback_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_feedback))
        .route("/faculty/{course_id}/{semester}", get(get_faculty_roster))
        .route("/{student_id}", get(get_student_feedback))
}
