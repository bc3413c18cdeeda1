pub mod auth;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::authenticate;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/send-otp", post(auth::send_otp))
        .route("/api/v1/auth/verify", post(auth::verify))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route(
            "/api/v1/auth/password-reset/request",
            post(auth::request_password_reset),
        )
        .route(
            "/api/v1/auth/password-reset/validate",
            post(auth::validate_reset_token),
        )
        .route(
            "/api/v1/auth/password-reset/confirm",
            post(auth::reset_password),
        )
        .route("/health", get(auth::health_check))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
