//! Shared fixtures: in-memory wiring with a scripted OTP source and a
//! recording notifier.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use verification_service::error::{AuthError, Result};
use verification_service::models::requests::RegisterRequest;
use verification_service::security::{JwtKeys, OtpSource, RevocationRegistry};
use verification_service::services::{AccountService, Notifier};
use verification_service::store::MemoryStore;
use verification_service::AppState;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-integration!";
pub const TEST_PASSWORD: &str = "Sup3rSecret!";

/// Hands out codes from a script, then repeats the last one.
pub struct ScriptedOtp {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedOtp {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            last: Mutex::new("999999".to_string()),
        }
    }
}

impl OtpSource for ScriptedOtp {
    fn next_code(&self) -> String {
        let mut codes = self.codes.lock().unwrap();
        match codes.pop_front() {
            Some(code) => {
                *self.last.lock().unwrap() = code.clone();
                code
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

/// Records every send instead of delivering anything.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Always fails, for exercising strict/lenient delivery handling.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
        Err(AuthError::Notifier("smtp unreachable".to_string()))
    }
}

pub struct Harness {
    pub service: AccountService,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub jwt: Arc<JwtKeys>,
    pub revocations: Arc<RevocationRegistry>,
}

impl Harness {
    pub fn new(otp_codes: &[&str]) -> Self {
        Self::build(otp_codes, 24, false)
    }

    pub fn with_token_ttl(otp_codes: &[&str], ttl_hours: i64) -> Self {
        Self::build(otp_codes, ttl_hours, false)
    }

    fn build(otp_codes: &[&str], ttl_hours: i64, strict_notifier: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let jwt = Arc::new(JwtKeys::new(TEST_SECRET, ttl_hours));
        let revocations = Arc::new(RevocationRegistry::new());

        let service = AccountService::new(
            store.clone(),
            notifier.clone(),
            Arc::new(ScriptedOtp::new(otp_codes)),
            jwt.clone(),
            revocations.clone(),
            "ROLE_MEMBER".to_string(),
            strict_notifier,
        );

        Self {
            service,
            store,
            notifier,
            jwt,
            revocations,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            accounts: self.service.clone(),
            jwt: self.jwt.clone(),
            revocations: self.revocations.clone(),
        }
    }
}

pub fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone_number: None,
        password: TEST_PASSWORD.to_string(),
    }
}
