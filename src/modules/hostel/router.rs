use crate::modules::hostel::controller::{
    create_hostel_complaint, get_hostel_complaints, get_hostel_fee, get_hostel_view,
    pay_hostel_fee,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_hostel_router() -> Router<AppState> {
    Router::new()
        .route("/hostel-assigned/{student_id}", get(get_hostel_view))
        .route("/hostel-fee/pay", post(pay_hostel_fee))
        .route("/hostel-fee/{student_id}", get(get_hostel_fee))
        .route("/hostel-complaint", post(create_hostel_complaint))
        .route("/hostel-complaint/{student_id}", get(get_hostel_complaints))
}
