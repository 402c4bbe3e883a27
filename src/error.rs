// region:    --- Imports
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Engine Error

/// Errors surfaced by the auction engine. All variants except `Store` are
/// recoverable at the web layer: they map to a 4xx response with a stable
/// `code` the caller can branch on.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),

    #[error("auction is closed")]
    ClosedAuction,

    #[error("bid of {amount} is below the required minimum of {minimum}")]
    BidTooLow { amount: Decimal, minimum: Decimal },

    #[error("only the listing creator may close it")]
    Permission,

    #[error("listing is already closed")]
    AlreadyClosed,

    #[error("username already taken")]
    UserExists,

    #[error("not found")]
    NotFound,

    #[error("bid retries exhausted")]
    RetriesExhausted,

    #[error("store error: {0}")]
    Store(sqlx::Error),
}

impl EngineError {
    /// Stable machine-readable code included in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "VALIDATION",
            EngineError::ClosedAuction => "CLOSED_AUCTION",
            EngineError::BidTooLow { .. } => "BID_TOO_LOW",
            EngineError::Permission => "PERMISSION",
            EngineError::AlreadyClosed => "ALREADY_CLOSED",
            EngineError::UserExists => "USER_EXISTS",
            EngineError::NotFound => "NOT_FOUND",
            EngineError::RetriesExhausted => "MAX_RETRIES_EXCEEDED",
            EngineError::Store(_) => "STORE",
        }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => EngineError::NotFound,
            other => EngineError::Store(other),
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = match self {
            EngineError::Validation(_)
            | EngineError::ClosedAuction
            | EngineError::BidTooLow { .. }
            | EngineError::AlreadyClosed => StatusCode::BAD_REQUEST,
            EngineError::Permission => StatusCode::FORBIDDEN,
            EngineError::UserExists | EngineError::RetriesExhausted => StatusCode::CONFLICT,
            EngineError::NotFound => StatusCode::NOT_FOUND,
            EngineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

// endregion: --- Engine Error
