/// Account model and status gate
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};

/// Administrative account state, distinct from the `enabled` flag
/// (`enabled` means "email verified").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Suspended,
    Locked,
}

/// Authorization role carried as a token claim. An account holds at most
/// one role at a time; assigning a new one replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub status: Status,
    pub enabled: bool,
    pub role: Option<Role>,
    pub verification_code: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub reset_code: Option<String>,
    pub reset_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: None,
            status: Status::Active,
            enabled: false,
            role: Some(role),
            verification_code: None,
            verification_expires_at: None,
            reset_code: None,
            reset_expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Status gate: checks are evaluated in a fixed order and the first
    /// failing one is returned, so the caller sees a stable error per state.
    /// Credentials are checked by the caller before this gate runs.
    pub fn can_login(&self) -> Result<()> {
        if !self.enabled {
            return Err(AuthError::NotVerified);
        }
        if self.status == Status::Locked {
            return Err(AuthError::Locked);
        }
        if self.status == Status::Suspended {
            return Err(AuthError::Suspended);
        }
        Ok(())
    }

    pub fn is_verified(&self) -> bool {
        self.enabled
    }

    /// Replaces any existing role.
    pub fn assign_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    pub fn role_names(&self) -> Vec<String> {
        self.role.iter().map(|r| r.name.clone()).collect()
    }

    pub fn set_verification_code(&mut self, code: String, expires_at: DateTime<Utc>) {
        self.verification_code = Some(code);
        self.verification_expires_at = Some(expires_at);
    }

    pub fn clear_verification_code(&mut self) {
        self.verification_code = None;
        self.verification_expires_at = None;
    }

    pub fn set_reset_code(&mut self, code: String, expires_at: DateTime<Utc>) {
        self.reset_code = Some(code);
        self.reset_expires_at = Some(expires_at);
    }

    pub fn clear_reset_code(&mut self) {
        self.reset_code = None;
        self.reset_expires_at = None;
    }

    pub fn pending_verification(&self) -> Option<(&str, DateTime<Utc>)> {
        match (&self.verification_code, self.verification_expires_at) {
            (Some(code), Some(expires_at)) => Some((code.as_str(), expires_at)),
            _ => None,
        }
    }

    pub fn pending_reset(&self) -> Option<(&str, DateTime<Utc>)> {
        match (&self.reset_code, self.reset_expires_at) {
            (Some(code), Some(expires_at)) => Some((code.as_str(), expires_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            "a@x.com",
            "$argon2id$stub",
            "Ada",
            "Lovelace",
            Role::new("ROLE_MEMBER"),
        )
    }

    #[test]
    fn gate_rejects_unverified_regardless_of_status() {
        for status in [Status::Active, Status::Suspended, Status::Locked] {
            let mut acc = account();
            acc.status = status;
            acc.enabled = false;
            assert!(matches!(acc.can_login(), Err(AuthError::NotVerified)));
        }
    }

    #[test]
    fn gate_checks_locked_before_suspended() {
        let mut acc = account();
        acc.enabled = true;
        acc.status = Status::Locked;
        assert!(matches!(acc.can_login(), Err(AuthError::Locked)));

        acc.status = Status::Suspended;
        assert!(matches!(acc.can_login(), Err(AuthError::Suspended)));
    }

    #[test]
    fn gate_allows_verified_active_account() {
        let mut acc = account();
        acc.enabled = true;
        assert!(acc.can_login().is_ok());
    }

    #[test]
    fn assigning_role_replaces_previous() {
        let mut acc = account();
        acc.assign_role(Role::new("ROLE_ADMIN"));
        assert_eq!(acc.role_names(), vec!["ROLE_ADMIN".to_string()]);
    }

    #[test]
    fn clearing_codes_removes_expiry_too() {
        let mut acc = account();
        acc.set_verification_code("123456".to_string(), Utc::now());
        acc.clear_verification_code();
        assert!(acc.pending_verification().is_none());
        assert!(acc.verification_expires_at.is_none());
    }
}
