//! WebServer-specific error types

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use engine::EngineError;
use serde_json::json;
use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed: {0}")]
    ServerStartup(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl WebServerError {
    pub fn config(message: String) -> Self {
        WebServerError::Config(message)
    }

    pub fn websocket(message: String) -> Self {
        WebServerError::WebSocketError(message)
    }

    pub fn internal(message: String) -> Self {
        WebServerError::InternalError(message)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::Engine(e) if e.is_invalid_filter() => StatusCode::UNPROCESSABLE_ENTITY,
            WebServerError::InvalidRequest { .. } | WebServerError::SharedError(_) | WebServerError::JsonError(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for WebServerError {
    fn from(rejection: JsonRejection) -> Self {
        WebServerError::InvalidRequest {
            details: rejection.body_text(),
        }
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
