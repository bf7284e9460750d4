//! Storefront API server.
//!
//! Run from repo root: `cargo run -p storefront-server`

use storefront_api::{app, AppState, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storefront_api=info,tower_http=info")),
        )
        .init();

    let state = AppState::from_config(&config).await?;
    let router = app(state, config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("storefront api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
