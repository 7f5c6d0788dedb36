use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

use crate::logging::is_observability_enabled;

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Installs the Prometheus recorder and spawns its upkeep task.
/// Returns `None` if observability is disabled.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

fn status_category(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);
    counter!("http_requests_by_status", "status_category" => status_category(status))
        .increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router for the metrics listener.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics

/// `outcome` is `applied` or `duplicate`.
pub fn track_placement_application(outcome: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("placement_applications_total", "outcome" => outcome.to_string()).increment(1);
}

/// `outcome` is `paid`, `already_paid` or `conflict`.
pub fn track_fee_payment(outcome: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("hostel_fee_payments_total", "outcome" => outcome.to_string()).increment(1);
}

pub fn track_room_allocated(hostel_id: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("hostel_rooms_allocated_total", "hostel" => hostel_id.to_string()).increment(1);
}

/// A conditional write lost a race and the operation re-read its input.
pub fn track_cas_retry(operation: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("optimistic_retries_total", "operation" => operation.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_category() {
        assert_eq!(status_category(201), "2xx");
        assert_eq!(status_category(409), "4xx");
        assert_eq!(status_category(503), "5xx");
        assert_eq!(status_category(101), "other");
    }

    #[test]
    fn test_business_counters_without_recorder() {
        track_placement_application("applied");
        track_fee_payment("paid");
        track_room_allocated("H001");
        track_cas_retry("hostel_fee.pay");
    }
}
