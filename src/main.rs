//! Aceso - scripted symptom checker service
//!
//! A Rust backend implementing a scripted conversation state machine with an
//! optional nearby-provider search.

mod api;
mod config;
mod places;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::AppConfig;
use places::{GooglePlacesClient, LoggingSearch, PlaceSearch};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aceso=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();
    tracing::info!(config = ?config, "Loaded configuration");

    // Provider search
    let google = GooglePlacesClient::new(&config.places)?;
    if !google.has_credentials() {
        tracing::warn!("No GOOGLE_API_KEY configured. Provider search will report a configuration error.");
    }
    let places: Arc<dyn PlaceSearch> = Arc::new(LoggingSearch::new(Arc::new(google)));

    // Create application state and router
    let state = AppState::new(places, config.session_idle_timeout);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Aceso server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
