use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Account not found")]
    NotFound,

    #[error("Email already registered")]
    AlreadyRegistered,

    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account email not verified")]
    NotVerified,

    #[error("Account is locked")]
    Locked,

    #[error("Account is suspended")]
    Suspended,

    #[error("Code or token expired")]
    Expired,

    #[error("Invalid code")]
    Mismatch,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Password does not meet strength requirements")]
    WeakPassword,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AuthError::NotFound => (StatusCode::NOT_FOUND, "Account not found".to_string()),
            AuthError::AlreadyRegistered => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            AuthError::AlreadyVerified => {
                (StatusCode::CONFLICT, "Account already verified".to_string())
            }
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthError::NotVerified => (
                StatusCode::FORBIDDEN,
                "Account email not verified".to_string(),
            ),
            AuthError::Locked => (StatusCode::FORBIDDEN, "Account is locked".to_string()),
            AuthError::Suspended => (StatusCode::FORBIDDEN, "Account is suspended".to_string()),
            AuthError::Expired => (StatusCode::UNAUTHORIZED, "Code or token expired".to_string()),
            AuthError::Mismatch => (StatusCode::BAD_REQUEST, "Invalid code".to_string()),
            AuthError::PasswordMismatch => {
                (StatusCode::BAD_REQUEST, "Passwords do not match".to_string())
            }
            // BadSignature, Malformed and Revoked are deliberately collapsed
            // into the same client-facing message; logs keep the distinction.
            AuthError::BadSignature | AuthError::Malformed | AuthError::Revoked => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            AuthError::WeakPassword => (
                StatusCode::BAD_REQUEST,
                "Password does not meet strength requirements".to_string(),
            ),
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::Notifier(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to deliver notification".to_string(),
            ),
            AuthError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
