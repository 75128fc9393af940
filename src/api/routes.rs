//! API route handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::server::SharedState;
use crate::auth::{MemoryStore, Role, SessionResolver, SessionStore};
use crate::fare::{FareQuote, SchedulePeriod};
use crate::portal::Navigation;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub path: String,
    /// Raw persisted session record, exactly as the client stored it
    #[serde(default)]
    pub record: Option<String>,
    /// Raw persisted driver profile, if any
    #[serde(default)]
    pub driver_record: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub authenticated: bool,
    pub role: Option<Role>,
    pub navigation: Navigation,
}

#[derive(Debug, Deserialize)]
pub struct FareQuery {
    pub pickup: String,
    pub destination: String,
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Route table

pub async fn list_routes(State(state): State<SharedState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.routes.entries().to_vec()))
}

// Guard evaluation

pub async fn navigate(
    State(state): State<SharedState>,
    Json(req): Json<NavigateRequest>,
) -> impl IntoResponse {
    let store = MemoryStore::new();
    let seeded = [
        (&state.keys.session, req.record.as_deref()),
        (&state.keys.driver, req.driver_record.as_deref()),
    ];
    for (key, value) in seeded {
        if let Some(value) = value {
            if let Err(e) = store.set(key, value) {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<NavigateResponse>::err(e.to_string())),
                );
            }
        }
    }

    let session = SessionResolver::new(store, state.keys.clone()).resolve();
    let navigation = state.routes.navigate(&req.path, &session);

    (
        StatusCode::OK,
        Json(ApiResponse::ok(NavigateResponse {
            authenticated: session.is_authenticated(),
            role: session.role,
            navigation,
        })),
    )
}

// Fare preview

pub async fn fare(
    State(state): State<SharedState>,
    Query(query): Query<FareQuery>,
) -> impl IntoResponse {
    let period = match query.period.as_deref().map(str::parse::<SchedulePeriod>) {
        None => SchedulePeriod::Once,
        Some(Ok(period)) => period,
        Some(Err(e)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<FareQuote>::err(e.to_string())),
            )
        }
    };

    let quote = state
        .fares
        .estimate(&query.pickup, &query.destination, period)
        .await;
    (StatusCode::OK, Json(ApiResponse::ok(quote)))
}
