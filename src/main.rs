use anyhow::{Context, Result};
use axum::{http::Request, Router};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vinvel_rust::{config::Settings, routes, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "vinvel_rust=info,tower_http=info".into())) // Default to info if RUST_LOG not set
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing Vinvel server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e); // Propagate the error
        }
    };

    // Parse the server address from settings
    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;
    let static_dir = settings.static_dir.clone();

    // One shared client for every content API call; previews have no timeout of their own
    let http_client = Arc::new(
        Client::builder()
            .user_agent(concat!("vinvel_rust/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to build shared reqwest client")?,
    );
    tracing::info!("Shared HTTP client created.");

    let app_state = AppState::new(settings, http_client);

    // Everything that is not a share link or API call is the static site
    let app: Router = routes::create_router(app_state)
        .fallback_service(ServeDir::new(&static_dir))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        );

    // Create a TCP listener
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {} (static files from {})", addr, static_dir);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into()); // Convert std::io::Error to anyhow::Error
        }
    };

    // Run the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
