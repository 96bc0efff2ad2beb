//! RPC error types and their JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use phishnet_ledger::LedgerError;
use phishnet_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    /// Client-side mistake; the message is the user-visible error body.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("storage error: {0}")]
    Store(String),

    #[error("server error: {0}")]
    Server(String),
}

impl From<StoreError> for RpcError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(key) => RpcError::NotFound(key),
            other => RpcError::Store(other.to_string()),
        }
    }
}

impl RpcError {
    fn status(&self) -> StatusCode {
        match self {
            RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::NotFound(_) => StatusCode::NOT_FOUND,
            RpcError::Ledger(_) | RpcError::Store(_) | RpcError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
