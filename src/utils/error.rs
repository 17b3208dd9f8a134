use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::store::StoreError;

/// Every failure a request can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized Access")]
    Unauthorized,

    #[error("Forbidden Access")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(String),

    #[error("No available seats")]
    NoAvailableSeats,

    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to generate access token: {0}")]
    Signing(String),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(what.to_string())
    }

    /// Message sent to the client. Server-side failures keep their detail in the log.
    fn public_message(&self) -> String {
        match self {
            ApiError::Signing(_) => "Failed to generate access token".to_string(),
            ApiError::Store(_) => "Database error".to_string(),
            ApiError::Gateway(_) => "Payment gateway error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NoAvailableSeats | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Signing(_) | ApiError::Store(_) | ApiError::Gateway(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        } else {
            log::warn!("⚠️ {} ({})", self, status.as_u16());
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": true,
            "message": self.public_message()
        }))
    }
}
