use std::sync::Arc;

use axum::http::Method;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use vox_gateway::{ServerConfig, routes, state::AppState};

/// Vox Gateway - unified TTS/STT streaming server
#[derive(Parser, Debug)]
#[command(name = "vox-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = ServerConfig::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let address = config.address();
    let state = Arc::new(AppState::new(config)?);

    // Permissive CORS, matching the original deployment behind a proxy.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = routes::create_api_router().layer(cors).with_state(state);

    let listener = TcpListener::bind(&address).await?;
    info!("vox-gateway listening on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}
