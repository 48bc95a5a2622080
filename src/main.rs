use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docchat_relay::{AppState, config::Config, router};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("listening on {bind_addr}");
    axum::serve(listener, router(state)).await
}
