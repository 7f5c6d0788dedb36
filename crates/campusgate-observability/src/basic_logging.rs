use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging for when `OBSERVABILITY_ENABLED=false`.
///
/// # Configuration
///
/// - **Log Level**: `LOG_LEVEL` (default: "info")
/// - **Filtering**: noisy dependencies held at warn
/// - **Format**: compact, with module paths and source locations
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "campusgate={log_level},tower_http=warn,hyper=warn,aws_config=warn,aws_smithy_runtime=warn"
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();

    eprintln!("Observability disabled - console logging only (OBSERVABILITY_ENABLED=false)");
}
