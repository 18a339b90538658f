use crate::agent::IntentAgent;
use crate::llm::LlmError;
use crate::models::agent::{ AgentRequest, AgentResponse };
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::State,
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use serde_json::json;
use std::fmt;
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error };
use uuid::Uuid;

/// Error reply for the HTTP surface. The message is safe to show callers; the
/// full upstream error only goes to the log.
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

impl ApiError {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self { message: message.into(), status_code: StatusCode::BAD_GATEWAY }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { message: message.into(), status_code: StatusCode::INTERNAL_SERVER_ERROR }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Upstream { status, .. } =>
                ApiError::bad_gateway(format!("Completion API returned HTTP {}", status)),
            LlmError::MalformedResponse(_) =>
                ApiError::bad_gateway("Completion API returned an unexpected response"),
            LlmError::Http(_) => ApiError::bad_gateway("Completion API is unreachable"),
            LlmError::Config(_) => ApiError::internal("Agent is misconfigured"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });
        (self.status_code, Json(body)).into_response()
    }
}

#[derive(Clone)]
struct AppState {
    agent: IntentAgent,
}

pub fn router(agent: IntentAgent) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/agent", post(agent_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { agent })
}

async fn agent_handler(
    State(state): State<AppState>,
    Json(req): Json<AgentRequest>,
) -> Result<Json<AgentResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    info!("[{}] POST /agent ({} chars)", request_id, req.message.chars().count());

    match state.agent.route(&req.message).await {
        Ok(resp) => {
            info!("[{}] Responded with intent '{}'", request_id, resp.intent);
            Ok(Json(resp))
        }
        Err(e) => {
            error!("[{}] Agent request failed: {}", request_id, e);
            Err(e.into())
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
