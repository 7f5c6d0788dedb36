use crate::modules::attendance::controller::{
    get_attendance, get_attendance_overall, record_attendance,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(get_attendance).post(record_attendance))
        .route("/attendance-overall/{student_id}", get(get_attendance_overall))
}
