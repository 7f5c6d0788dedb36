//! Span helpers for store-backed operations.

use tracing::Span;

/// Span for a call into the document store.
///
/// # Example
/// ```ignore
/// let span = store_span!("query", "Results", student_id = %id);
/// async { /* store call */ }.instrument(span).await;
/// ```
#[macro_export]
macro_rules! store_span {
    ($operation:expr, $collection:expr) => {
        tracing::info_span!(
            "store.call",
            db.system = "dynamodb",
            db.operation = $operation,
            db.collection = $collection,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty
        )
    };
    ($operation:expr, $collection:expr, $($field:tt)*) => {
        tracing::info_span!(
            "store.call",
            db.system = "dynamodb",
            db.operation = $operation,
            db.collection = $collection,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty,
            $($field)*
        )
    };
}

pub fn record_success() {
    Span::current().record("otel.status_code", "OK");
}

pub fn record_error(message: &str) {
    let span = Span::current();
    span.record("otel.status_code", "ERROR");
    span.record("error.message", message);
}

/// Logs the error and hands the result back unchanged.
pub trait ErrorExt {
    fn log_error(self, context: &str) -> Self;
}

impl<T, E: std::fmt::Display> ErrorExt for Result<T, E> {
    fn log_error(self, context: &str) -> Self {
        if let Err(ref e) = self {
            tracing::error!(error = %e, context = context, "Operation failed");
            record_error(&e.to_string());
        }
        self
    }
}
