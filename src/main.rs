use good_dogs::{router, AppState, Config};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config);
    state.votes.prepare().await?;

    if !config.public_dir.is_dir() {
        warn!(
            "public directory {} not found, static files will 404",
            config.public_dir.display()
        );
    }

    info!(
        votes = %config.vote_log_path.display(),
        images = %config.image_source,
        popup_mode = %config.popup_mode,
        failure_feedback = %config.failure_feedback,
        "good dogs configured"
    );

    let app = router(state, &config.public_dir);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Good Dogs server running on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
