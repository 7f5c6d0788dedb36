use std::net::SocketAddr;

use anyhow::Context;
use campusgate::router::init_router;
use campusgate::state::init_app_state;
use campusgate_config::ServerConfig;
use campusgate_observability::{
    init_basic_console_logging, init_metrics, init_tracing, is_observability_enabled,
    metrics_app, shutdown_tracer,
};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if is_observability_enabled() {
        init_tracing()?;
    } else {
        init_basic_console_logging();
    }

    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics()? {
        let metrics_addr = server_config.metrics_bind_address();
        let listener = tokio::net::TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("binding metrics listener on {metrics_addr}"))?;
        info!(address = %metrics_addr, "Metrics endpoint listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state().await?;
    let app = init_router(state);

    let addr = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(address = %addr, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
