//! REST API Server for the financial query engine
//!
//! Exposes the engine via HTTP endpoints
//! Integrates with the chart-rendering frontend

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::QueryEngine;
use crate::error::QueryEngineError;

/// =============================
/// Request / Error Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for QueryEngineError {
    fn into_response(self) -> Response {
        let status = match &self {
            QueryEngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match self {
            QueryEngineError::InvalidRequest(message) => message,
            other => other.to_string(),
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<QueryEngine>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(
                %request_id,
                error = %rejection.body_text(),
                "Rejected malformed chat request"
            );
            return QueryEngineError::InvalidRequest(format!(
                "Invalid request body: {}",
                rejection.body_text()
            ))
            .into_response();
        }
    };

    let query = match req.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => query.to_string(),
        _ => {
            warn!(%request_id, "Rejected chat request without a query");
            return QueryEngineError::InvalidRequest("No query provided".into()).into_response();
        }
    };

    info!(%request_id, query = %query, "Received chat query");

    let payload = state.engine.process(&query);
    (StatusCode::OK, Json(payload)).into_response()
}

/// =============================
/// Router
/// =============================

pub fn create_router(engine: Arc<QueryEngine>) -> Router {
    let state = ApiState { engine };

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(engine: Arc<QueryEngine>, bind_address: &str) -> crate::Result<()> {
    let router = create_router(engine);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;

    info!("API Server listening on http://{}", bind_address);

    axum::serve(listener, router)
        .await
        .map_err(|e| QueryEngineError::ServerError(e.to_string()))?;

    Ok(())
}
