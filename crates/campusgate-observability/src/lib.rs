//! Campusgate observability
//!
//! Provides configurable observability features including:
//! - Tracing and distributed tracing via OpenTelemetry
//! - Metrics collection via Prometheus
//! - HTTP request/response logging
//!
//! This module can be enabled or disabled at compile time via the `observability` feature flag.
//! At runtime, observability can be further controlled via the `OBSERVABILITY_ENABLED` environment variable.
//!
//! # Features
//!
//! - `observability` (default): Enables all observability features including tracing, logging, and metrics
//!
//! # Examples
//!
//! ```no_run
//! use campusgate_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

#[cfg(feature = "observability")]
pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;
#[cfg(feature = "observability")]
pub mod tracing_utils;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use basic_logging::init_basic_console_logging;
#[cfg(feature = "observability")]
pub use logging::{
    init_tracing, is_observability_enabled, logging_middleware, shutdown_tracer,
};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_cas_retry, track_fee_payment,
    track_placement_application, track_room_allocated,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    pub type PrometheusHandle = ();

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() -> anyhow::Result<()> {
        Ok(())
    }

    pub fn init_basic_console_logging() {}

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
        Ok(None)
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    pub fn track_placement_application(_outcome: &str) {}
    pub fn track_fee_payment(_outcome: &str) {}
    pub fn track_room_allocated(_hostel_id: &str) {}
    pub fn track_cas_retry(_operation: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
