use crate::modules::grievances::controller::{create_grievance, get_grievances};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_grievances_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_grievance))
        .route("/{student_id}", get(get_grievances))
}
