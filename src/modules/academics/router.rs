use crate::modules::academics::controller::{
    get_circulars, get_resources, get_subject_by_code, get_subjects,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_academics_router() -> Router<AppState> {
    Router::new()
        .route("/subjects", get(get_subjects))
        .route("/subjects/by-code", get(get_subject_by_code))
        .route("/circulars/{course_id}", get(get_circulars))
        .route("/resources", get(get_resources))
}
