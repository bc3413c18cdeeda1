/// One-time code generation and validation
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::error::{AuthError, Result};

/// What a pending code authorizes. Each purpose carries its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Verification,
    Reset,
}

impl OtpPurpose {
    pub fn ttl(self) -> Duration {
        match self {
            OtpPurpose::Verification => Duration::minutes(5),
            OtpPurpose::Reset => Duration::minutes(10),
        }
    }

    pub fn ttl_minutes(self) -> i64 {
        self.ttl().num_minutes()
    }
}

/// Source of fresh codes. Injected so tests can pin the generated value.
pub trait OtpSource: Send + Sync {
    fn next_code(&self) -> String;
}

/// Uniformly random 6-digit code, never zero-padded below 100000.
pub struct RandomOtp;

impl OtpSource for RandomOtp {
    fn next_code(&self) -> String {
        rand::thread_rng().gen_range(100_000..1_000_000).to_string()
    }
}

/// Check a submitted code against the pending one.
///
/// Fails `NotFound` when nothing is pending, `Expired` when the window has
/// passed, `Mismatch` when the strings differ. Codes are compared as opaque
/// strings in constant time. Clearing the code after a successful check is
/// the caller's responsibility (single use).
pub fn validate_code(
    pending: Option<(&str, DateTime<Utc>)>,
    submitted: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let (code, expires_at) = pending.ok_or(AuthError::NotFound)?;

    if now > expires_at {
        return Err(AuthError::Expired);
    }

    if constant_time_eq(code.as_bytes(), submitted.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::Mismatch)
    }
}

/// Length check short-circuits; the byte comparison itself does not.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
