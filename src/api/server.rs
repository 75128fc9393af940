//! HTTP decision service

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::SessionKeys;
use crate::config::Config;
use crate::error::Result;
use crate::fare::FareClient;
use crate::portal::RouteTable;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub routes: RouteTable,
    pub keys: SessionKeys,
    pub fares: FareClient,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            routes: RouteTable::with_overrides(&config.routes),
            keys: SessionKeys::from(&config.storage),
            fares: FareClient::new(&config.api)?,
        })
    }
}

/// Run the HTTP decision service
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    serve(listener, &config).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/routes", get(routes::list_routes))
        .route("/api/navigate", post(routes::navigate))
        .route("/api/fare", get(routes::fare))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
