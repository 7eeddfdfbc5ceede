use project_api::{config::GatewayConfig, Application};
use project_common::error::AppError;
use project_common::observability::init_tracing;
use tokio::signal;
use tracing::Instrument;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = GatewayConfig::from_env()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    let service_span = tracing::info_span!(
        "service",
        service = %config.service_name,
        environment = ?config.environment,
    );
    serve(config).instrument(service_span).await
}

async fn serve(config: GatewayConfig) -> Result<(), AppError> {
    tracing::info!("Starting project-api gateway");

    let app = Application::build(config).await?;

    tokio::select! {
        result = app.run_until_stopped() => result?,
        _ = shutdown_signal() => {},
    }

    tracing::info!("Gateway shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
