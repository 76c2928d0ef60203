use dotenvy::dotenv;
use snafu::ResultExt;

use showreel::api;
use showreel::config::Config;
use showreel::error::{ApplicationError, BindAddressSnafu, LoadCatalogSnafu, WebServerSnafu};
use showreel::logger;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    dotenv().ok();

    let config = Config::from_env()?;

    let _guard = logger::init(&config)?;

    let app = config.app();
    let clips = app.clips.load().await.context(LoadCatalogSnafu)?;
    tracing::info!(count = clips.len(), "loaded clip catalog from `{}`", config.clips.display());

    let listener = tokio::net::TcpListener::bind(config.host)
        .await
        .context(BindAddressSnafu {
            address: config.host,
        })?;
    tracing::info!("listening on {}", config.host);

    axum::serve(listener, api::create_router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(WebServerSnafu)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
