use crate::modules::faculty::controller::{
    get_faculty, get_faculty_assignment, get_faculty_feedback, update_faculty_profile,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// Routes mounted under `/api`.
pub fn init_faculty_api_router() -> Router<AppState> {
    Router::new()
        .route("/faculty/{faculty_id}", put(update_faculty_profile))
        .route("/faculty/feedback/{faculty_id}", get(get_faculty_feedback))
        .route("/faculty-assignments", get(get_faculty_assignment))
}

/// Routes mounted at the root.
pub fn init_faculty_router() -> Router<AppState> {
    Router::new().route("/faculty/{faculty_id}", get(get_faculty))
}
