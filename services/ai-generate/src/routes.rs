use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::upstream::{mock_completion, UpstreamClient, UpstreamError};

pub(crate) const DEFAULT_MAX_TOKENS: u32 = 100;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRequest {
    pub(crate) prompt: String,
    #[serde(default)]
    pub(crate) system_prompt: Option<String>,
    #[serde(default)]
    pub(crate) max_tokens: Option<u32>,
}

pub(crate) fn generate_router(client: Arc<UpstreamClient>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(healthcheck))
        .route("/api/v1/ai/generate", post(generate_handler))
        .with_state(client)
}

async fn banner() -> Json<serde_json::Value> {
    Json(json!({"message": "StayConnect generate API is running"}))
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy"}))
}

async fn generate_handler(
    State(client): State<Arc<UpstreamClient>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    let max_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    let result = client
        .generate(&request.prompt, request.system_prompt.as_deref(), max_tokens)
        .await;

    match result {
        Ok(completion) => (StatusCode::OK, Json(completion)).into_response(),
        Err(UpstreamError::Connect) => {
            info!("completion backend offline, serving mock completion");
            (StatusCode::OK, Json(mock_completion(&request.prompt))).into_response()
        }
        Err(err) => {
            let status = match &err {
                UpstreamError::Timeout => StatusCode::REQUEST_TIMEOUT,
                UpstreamError::Status(_) | UpstreamError::MalformedPayload => {
                    StatusCode::BAD_GATEWAY
                }
                UpstreamError::Connect | UpstreamError::Transport(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, Json(json!({"error": err.to_string()}))).into_response()
        }
    }
}
