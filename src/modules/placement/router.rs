use crate::modules::placement::controller::{
    apply_for_placement, get_placement_applications, get_placement_drives,
    get_placement_profile, get_placement_stats,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_placement_router() -> Router<AppState> {
    Router::new()
        .route("/stats/{course_id}", get(get_placement_stats))
        .route("/drives", get(get_placement_drives))
        .route("/profile/{student_id}", get(get_placement_profile))
        .route("/apply", post(apply_for_placement))
        .route("/applications/{student_id}", get(get_placement_applications))
}
