use crate::modules::exams::controller::{
    get_admit_cards, get_results, get_upcoming_exams, mark_admit_card_downloaded,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/upcoming", get(get_upcoming_exams))
        .route("/admit-card/downloaded", post(mark_admit_card_downloaded))
        .route("/admit-card/{student_id}", get(get_admit_cards))
        .route("/results/{student_id}", get(get_results))
}
