use crate::modules::courses::controller::{
    get_course_details, get_course_sections, list_course_details, list_courses,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes mounted under `/api`.
pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/coursedetails", get(list_course_details))
        .route("/courses", get(list_courses))
        .route("/course-sections", get(get_course_sections))
}

/// Routes mounted at the root.
pub fn init_course_details_router() -> Router<AppState> {
    Router::new().route("/coursedetails/{course_id}", get(get_course_details))
}
