use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RukunError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

pub type RukunResult<T> = Result<T, RukunError>;

impl IntoResponse for RukunError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RukunError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            RukunError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            RukunError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            RukunError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            RukunError::Store(ref detail) => {
                tracing::error!("Store Error: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    "Gagal mengakses penyimpanan data.".to_string(),
                )
            }
            RukunError::Network(ref e) => {
                tracing::error!("Network Error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Koneksi ke penyimpanan data gagal.".to_string(),
                )
            }
            ref other => {
                tracing::error!("Unhandled Error: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Terjadi kesalahan yang tidak diketahui.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
