use crate::modules::fees::controller::{get_fee_structure, get_fees_paid};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_fees_router() -> Router<AppState> {
    Router::new()
        .route("/feestructure", get(get_fee_structure))
        .route("/feepaid", get(get_fees_paid))
}
