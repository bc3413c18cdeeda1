/// Account lifecycle orchestration: registration, verification, login,
/// logout and password reset.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::models::requests::RegisterRequest;
use crate::models::{Account, Role};
use crate::security::otp::{validate_code, OtpPurpose, OtpSource};
use crate::security::{password, JwtKeys, RevocationRegistry};
use crate::services::notifier::{reset_email_body, verification_email_body, Notifier};
use crate::store::CredentialStore;

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    otp: Arc<dyn OtpSource>,
    jwt: Arc<JwtKeys>,
    revocations: Arc<RevocationRegistry>,
    default_role: String,
    strict_notifier: bool,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
        otp: Arc<dyn OtpSource>,
        jwt: Arc<JwtKeys>,
        revocations: Arc<RevocationRegistry>,
        default_role: String,
        strict_notifier: bool,
    ) -> Self {
        Self {
            store,
            notifier,
            otp,
            jwt,
            revocations,
            default_role,
            strict_notifier,
        }
    }

    /// Create an unverified account and send it a verification code.
    ///
    /// Re-registering an address that never completed verification
    /// overwrites the pending record instead of failing; only a verified
    /// account blocks the email.
    pub async fn register(&self, req: &RegisterRequest) -> Result<Account> {
        let existing = self.store.find_by_email(&req.email).await?;
        if let Some(existing) = &existing {
            if existing.is_verified() {
                return Err(AuthError::AlreadyRegistered);
            }
        }

        let password_hash = password::hash_password(&req.password)?;

        let mut account = Account::new(
            req.email.as_str(),
            password_hash,
            req.first_name.as_str(),
            req.last_name.as_str(),
            Role::new(self.default_role.as_str()),
        );
        account.phone_number = req.phone_number.clone();
        if let Some(existing) = existing {
            account.id = existing.id;
            account.created_at = existing.created_at;
        }

        let code = self.issue_verification_code(&mut account);
        let account = self.store.save(account).await?;
        self.deliver_verification(&account.email, &code).await?;

        tracing::info!(email = %mask_email(&account.email), "Account registered, verification code sent");
        Ok(account)
    }

    /// Resend a verification code, overwriting any pending one. Only the
    /// newest code stays valid.
    pub async fn send_verification_otp(&self, email: &str) -> Result<()> {
        let mut account = self.require_account(email).await?;
        if account.is_verified() {
            return Err(AuthError::AlreadyVerified);
        }

        let code = self.issue_verification_code(&mut account);
        self.store.save(account).await?;
        self.deliver_verification(email, &code).await?;

        tracing::info!(email = %mask_email(email), "Verification code reissued");
        Ok(())
    }

    /// Consume a verification code and mark the account's email verified.
    /// A consumed code is cleared, so replaying it fails with `NotFound`.
    pub async fn verify(&self, email: &str, code: &str) -> Result<()> {
        let mut account = self.require_account(email).await?;

        validate_code(account.pending_verification(), code, Utc::now())?;

        account.enabled = true;
        account.clear_verification_code();
        self.store.save(account).await?;

        tracing::info!(email = %mask_email(email), "Account email verified");
        Ok(())
    }

    /// Credential check, status gate, then token issuance.
    pub async fn login(&self, email: &str, password_plain: &str) -> Result<(Account, String)> {
        let account = self.require_account(email).await?;

        password::verify_password(password_plain, &account.password_hash)?;
        account.can_login()?;

        let token = self.jwt.issue(&account)?;
        tracing::info!(email = %mask_email(email), "Login succeeded");
        Ok((account, token))
    }

    /// Revoke a presented token until its embedded expiry. The token must
    /// still validate; an already-invalid token has nothing to revoke.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let claims = self.jwt.validate(token)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);

        self.revocations.revoke(token, expires_at);
        tracing::info!(email = %mask_email(&claims.sub), "Session token revoked");
        Ok(())
    }

    /// Issue a password-reset code (10-minute window) and mail it out.
    pub async fn generate_reset_token(&self, email: &str) -> Result<()> {
        let mut account = self.require_account(email).await?;

        let code = self.otp.next_code();
        account.set_reset_code(code.clone(), Utc::now() + OtpPurpose::Reset.ttl());
        self.store.save(account).await?;

        self.deliver(
            email,
            "Reset your password",
            &reset_email_body(&code, OtpPurpose::Reset.ttl_minutes()),
        )
        .await?;

        tracing::info!(email = %mask_email(email), "Password reset code sent");
        Ok(())
    }

    /// Check a reset code without consuming it; the code stays pending
    /// until the password is actually reset.
    pub async fn validate_reset_token(&self, email: &str, code: &str) -> Result<()> {
        let account = self.require_account(email).await?;
        validate_code(account.pending_reset(), code, Utc::now())
    }

    /// Consume the reset code and store a new password hash.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<()> {
        let mut account = self.require_account(email).await?;

        validate_code(account.pending_reset(), code, Utc::now())?;
        if new_password != confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        account.password_hash = password::hash_password(new_password)?;
        account.clear_reset_code();
        self.store.save(account).await?;

        tracing::info!(email = %mask_email(email), "Password reset completed");
        Ok(())
    }

    /// Replace the account's role with the named one.
    pub async fn assign_role(&self, account_id: Uuid, role_name: &str) -> Result<Account> {
        let mut account = self
            .store
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        account.assign_role(Role::new(role_name));
        let account = self.store.save(account).await?;

        tracing::info!(account_id = %account_id, role = %role_name, "Role assigned");
        Ok(account)
    }

    pub async fn delete_account(&self, account_id: Uuid) -> Result<()> {
        self.store.delete(account_id).await?;
        tracing::info!(account_id = %account_id, "Account deleted");
        Ok(())
    }

    async fn require_account(&self, email: &str) -> Result<Account> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)
    }

    fn issue_verification_code(&self, account: &mut Account) -> String {
        let code = self.otp.next_code();
        account.set_verification_code(code.clone(), Utc::now() + OtpPurpose::Verification.ttl());
        code
    }

    async fn deliver_verification(&self, email: &str, code: &str) -> Result<()> {
        self.deliver(
            email,
            "Verify your email address",
            &verification_email_body(code, OtpPurpose::Verification.ttl_minutes()),
        )
        .await
    }

    /// Delivery failures fail the operation only in strict mode; the
    /// pending code is already persisted either way.
    async fn deliver(&self, email: &str, subject: &str, body: &str) -> Result<()> {
        match self.notifier.send(email, subject, body).await {
            Ok(()) => Ok(()),
            Err(err) if self.strict_notifier => Err(err),
            Err(err) => {
                tracing::warn!(email = %mask_email(email), error = %err, "Email delivery failed, continuing");
                Ok(())
            }
        }
    }
}

/// Keep addresses out of logs; only a short prefix and the domain survive.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 2 => {
            let prefix: String = local.chars().take(2).collect();
            format!("{prefix}***@{domain}")
        }
        Some((_, domain)) => format!("***@{domain}"),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_email_keeps_domain_only() {
        assert_eq!(mask_email("adalovelace@x.com"), "ad***@x.com");
        assert_eq!(mask_email("ab@x.com"), "***@x.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
