// Identity and session lifecycle service for the WeConnect platform:
// registration with email OTP verification, credential-gated login, JWT
// sessions, logout revocation and password reset.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod security;
pub mod services;
pub mod store;

use std::sync::Arc;

pub use error::{AuthError, Result};

use security::{JwtKeys, RevocationRegistry};
use services::AccountService;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub jwt: Arc<JwtKeys>,
    pub revocations: Arc<RevocationRegistry>,
}
