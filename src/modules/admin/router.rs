use crate::modules::admin::controller::get_admin;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_admin_router() -> Router<AppState> {
    Router::new().route("/{admin_id}", get(get_admin))
}
