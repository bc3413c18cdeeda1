/// Out-of-band delivery of codes to users
use async_trait::async_trait;
use lettre::message::{header, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Config;
use crate::error::{AuthError, Result};

/// Delivery collaborator. Failures are surfaced to the caller, which
/// decides whether they fail the surrounding operation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// SMTP-backed notifier using lettre's async transport.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn from_config(config: &Config) -> Result<Self> {
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Internal(format!("Invalid SMTP_FROM address: {e}")))?;

        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| AuthError::Internal(format!("Failed to configure SMTP transport: {e}")))?
            .port(config.smtp_port);

        let builder = if let (Some(username), Some(password)) =
            (&config.smtp_username, &config.smtp_password)
        {
            builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            builder
        };

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Notifier(format!("Invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| AuthError::Notifier(format!("Failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AuthError::Notifier(format!("SMTP delivery failed: {e}")))?;

        Ok(())
    }
}

/// Log-only notifier used when SMTP is unconfigured (development, tests).
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<()> {
        tracing::info!(recipient = %to, subject = %subject, "Email delivery skipped (no SMTP configured)");
        Ok(())
    }
}

pub fn verification_email_body(code: &str, valid_minutes: i64) -> String {
    format!(
        "<div style='font-family: Arial, sans-serif;'>\
         <h2>Welcome!</h2>\
         <p>Thank you for signing up. To complete your registration, please use the following verification code:</p>\
         <p style='font-size: 28px; font-weight: bold; letter-spacing: 2px;'>{code}</p>\
         <p>This code is valid for {valid_minutes} minutes.</p>\
         <p>If you did not create an account, you can safely ignore this email.</p>\
         </div>"
    )
}

pub fn reset_email_body(code: &str, valid_minutes: i64) -> String {
    format!(
        "<div style='font-family: Arial, sans-serif;'>\
         <h2>Password Reset Request</h2>\
         <p>You requested to reset your password. Please use the code below to continue:</p>\
         <p style='font-size: 28px; font-weight: bold; letter-spacing: 4px;'>{code}</p>\
         <p>This code will expire in {valid_minutes} minutes. Please do not share it with anyone.</p>\
         <p>If you didn't request a password reset, you can ignore this email safely.</p>\
         </div>"
    )
}
