use std::sync::Arc;

use crate::docs::ApiDoc;
use crate::modules::academics::init_academics_router;
use crate::modules::admin::init_admin_router;
use crate::modules::attendance::init_attendance_router;
use crate::modules::auth::init_auth_router;
use crate::modules::courses::{init_course_details_router, init_courses_router};
use crate::modules::exams::init_exams_router;
use crate::modules::faculty::{init_faculty_api_router, init_faculty_router};
use crate::modules::feedback::init_feedback_router;
use crate::modules::fees::init_fees_router;
use crate::modules::grievances::init_grievances_router;
use crate::modules::hostel::init_hostel_router;
use crate::modules::placement::init_placement_router;
use crate::modules::students::{init_student_records_router, init_students_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Json, Router, middleware, routing::get};
use campusgate_observability::{logging_middleware, metrics_middleware};
use serde_json::{Value, json};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", init_auth_router())
        .nest("/admin", init_admin_router())
        .nest("/students", init_students_router())
        .nest("/exams", init_exams_router())
        .nest("/placement", init_placement_router())
        .nest("/grievances", init_grievances_router())
        .nest("/feedback", init_feedback_router())
        .merge(init_faculty_api_router())
        .merge(init_courses_router())
        .merge(init_fees_router())
        .merge(init_academics_router())
        .merge(init_attendance_router())
        .merge(init_hostel_router())
}

pub fn init_router(state: AppState) -> Router {
    let mut routes = Router::new()
        .nest("/api", api_router())
        .merge(init_student_records_router())
        .merge(init_faculty_router())
        .merge(init_course_details_router())
        .with_state(state.clone());

    if let Some(config) = state.rate_limit_config.governor_config() {
        routes = routes.layer(GovernorLayer::new(Arc::new(config)));
    }

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .merge(routes)
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
