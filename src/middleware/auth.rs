/// Bearer-token authentication layer
///
/// Pipeline per request: validate the token, check the revocation
/// registry, then attach the authenticated identity to the request. Any
/// failure short-circuits with 401 before the handler runs. Requests
/// without a bearer Authorization header pass through unauthenticated;
/// protected handlers still require the attached context.
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::AuthError;
use crate::security::Claims;
use crate::AppState;

/// Validated identity attached to the request for downstream
/// authorization checks.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account_id: Uuid,
    pub subject: String,
    pub roles: Vec<String>,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            account_id: claims.uid,
            subject: claims.sub,
            roles: claims.roles,
        }
    }
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    // Only a bearer credential engages this layer; other schemes carry
    // nothing we can check and proceed unauthenticated.
    if let Some(token) = header_value.as_deref().and_then(bearer_token) {
        let claims = match state.jwt.validate(token) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::warn!(error = %err, "Rejected bearer token");
                return err.into_response();
            }
        };

        if state.revocations.is_revoked(token) {
            tracing::warn!(subject = %claims.sub, "Rejected revoked bearer token");
            return AuthError::Revoked.into_response();
        }

        req.extensions_mut().insert(AuthContext::from(claims));
    }

    next.run(req).await
}

/// Pull the bearer token out of an Authorization header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}
