use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use votechain_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("unknown candidate: {0}")]
    UnknownCandidate(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Ledger(LedgerError::DuplicateVoter) => StatusCode::CONFLICT,
            ServerError::Ledger(LedgerError::InvalidInput { .. })
            | ServerError::UnknownCandidate(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
