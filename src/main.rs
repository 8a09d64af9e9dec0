use std::net::SocketAddr;

use riot_proxy::{
    config::Config,
    error::AppError,
    http::{self, AppState, middleware},
    logging,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    logging::init()?;

    info!("🐙 Starting...");

    let config = Config::from_env().inspect_err(|e| error!(error = %e, "❌ Invalid configuration"))?;

    let state = AppState::new(&config)?;

    tokio::spawn(state.riot.metrics().clone().log_loop());
    tokio::spawn(middleware::prune_loop(state.limiter.clone()));

    let app = http::router(state, &config);

    let listener = TcpListener::bind(&config.server_addr).await?;
    info!(
        addr = %config.server_addr,
        platform = %config.platform,
        window = config.winrate.window,
        "🌐 Listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("👋 Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "❌ Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
