// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles GET /, POST /chat and GET /health.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use meeple_core::HealthStatus;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::page;
use crate::server::AppState;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub mensaje: String,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub respuesta: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every component is healthy, `degraded` otherwise.
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub model_client: String,
    pub storage: String,
}

/// GET /
///
/// Renders the chat page with the full history and every recommendation.
pub async fn index(State(state): State<AppState>) -> Response {
    let storage = state.chat.storage();
    let loaded = async {
        let turns = storage.list_turns().await?;
        let recs = storage.list_recommendations().await?;
        Ok::<_, meeple_core::MeepleError>((turns, recs))
    }
    .await;

    match loaded {
        Ok((turns, recs)) => Html(page::render_page(&turns, &recs)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load chat history");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(page::render_error_page(&e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /chat
///
/// Runs one exchange and returns the composed reply.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatError> {
    let reply = state.chat.handle_message(&body.mensaje).await?;
    Ok(Json(ChatResponse {
        respuesta: reply.respuesta,
    }))
}

/// GET /health
///
/// Reports the model client and the store. Always 200.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_client = match state.chat.provider() {
        Some(provider) => component_label(provider.health_check().await),
        None => "unavailable".to_string(),
    };
    let storage = component_label(state.chat.storage().health_check().await);

    let status = if model_client == "healthy" && storage == "healthy" {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        model_client,
        storage,
    })
}

fn component_label(result: Result<HealthStatus, meeple_core::MeepleError>) -> String {
    match result {
        Ok(status) => status.label(),
        Err(e) => format!("unhealthy: {e}"),
    }
}
