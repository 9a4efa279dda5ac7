//! HTTP query surface
//!
//! Read-only, point-in-time snapshots of the chat server's state. Every
//! handler asks the actor through its command channel, so answers are
//! consistent with the event stream.

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::AppError;
use crate::models::{ChatMessage, Product, User};
use crate::server::{query, ServerCommand};

/// Banner returned by the root route
pub const BANNER: &str = "Marketplace chat server is running";

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub cmd_tx: mpsc::Sender<ServerCommand>,
}

/// Build the HTTP router
pub fn router(cmd_tx: mpsc::Sender<ServerCommand>, origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/messages", get(messages_handler))
        .route("/api/users", get(users_handler))
        .route("/api/products", get(products_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ApiState { cmd_tx })
}

async fn root_handler() -> &'static str {
    BANNER
}

/// Current message log, oldest first
async fn messages_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = query(&state.cmd_tx, |reply| ServerCommand::GetMessages { reply }).await?;
    Ok(Json(messages))
}

/// Current joined users
async fn users_handler(State(state): State<ApiState>) -> Result<Json<Vec<User>>, AppError> {
    let users = query(&state.cmd_tx, |reply| ServerCommand::GetUsers { reply }).await?;
    Ok(Json(users))
}

/// Current catalog with seller assignments
async fn products_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = query(&state.cmd_tx, |reply| ServerCommand::GetProducts { reply }).await?;
    Ok(Json(products))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!("HTTP query failed: {}", self);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
