use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{info, warn};

use personalsite::bootstrap::app_context::AppContext;
use personalsite::bootstrap::config::Config;
use personalsite::presentation::http::router::app_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "personalsite=debug,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting personalsite backend");

    // Ensure the media tree exists so an empty site still boots cleanly.
    if let Err(e) = tokio::fs::create_dir_all(&cfg.media_root).await {
        warn!(error = ?e, dir = %cfg.media_root, "Failed to create media root");
    }

    let ctx = AppContext::new(cfg.clone());
    let app = app_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
