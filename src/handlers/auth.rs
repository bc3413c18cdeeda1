/// Authentication handlers
///
/// Thin layer over `AccountService`: deserialize, validate, delegate,
/// map errors through `IntoResponse`.
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::error::AuthError;
use crate::middleware::{bearer_token, AuthContext};
use crate::models::requests::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, ResetTokenRequest, SendOtpRequest, ValidateResetTokenRequest,
    VerifyRequest,
};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let account = state.accounts.register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            email: account.email,
            first_name: account.first_name,
        }),
    ))
}

pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    state.accounts.send_verification_otp(&payload.email).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Verification code sent")),
    ))
}

pub async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Result<impl IntoResponse, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    state.accounts.verify(&payload.email, &payload.code).await?;

    Ok(Json(MessageResponse::new("Account verified")))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let (account, token) = state
        .accounts
        .login(&payload.email, &payload.password)
        .await?;

    let roles = account.role_names();
    Ok(Json(LoginResponse {
        token,
        email: account.email,
        first_name: account.first_name,
        roles,
        expires_in: state.jwt.token_ttl_secs(),
    }))
}

/// Logout expects `Authorization: Bearer <token>`; the authentication
/// layer has already validated it and attached the caller's context.
pub async fn logout(
    State(state): State<AppState>,
    context: Option<Extension<AuthContext>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AuthError> {
    let Some(Extension(_context)) = context else {
        return Err(AuthError::InvalidCredentials);
    };

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::InvalidCredentials)?;

    state.accounts.logout(token).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetTokenRequest>,
) -> Result<impl IntoResponse, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    state.accounts.generate_reset_token(&payload.email).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Reset code sent to email")),
    ))
}

pub async fn validate_reset_token(
    State(state): State<AppState>,
    Json(payload): Json<ValidateResetTokenRequest>,
) -> Result<impl IntoResponse, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    state
        .accounts
        .validate_reset_token(&payload.email, &payload.code)
        .await?;

    Ok(Json(MessageResponse::new("Reset code is valid")))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    state
        .accounts
        .reset_password(
            &payload.email,
            &payload.code,
            &payload.new_password,
            &payload.confirmation_password,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}

pub async fn health_check() -> &'static str {
    "OK"
}
