/// Configuration management
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,

    /// Symmetric signing key for session tokens (HS256)
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Period of the revocation registry sweep
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// SMTP settings; empty host means the notifier runs in no-op mode
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default)]
    pub smtp_password: Option<String>,
    #[serde(default = "default_smtp_from")]
    pub smtp_from: String,

    /// Strict mode fails the OTP transaction when email delivery fails;
    /// lenient (default) logs a warning and continues.
    #[serde(default)]
    pub strict_notifier: bool,

    #[serde(default = "default_role")]
    pub default_role: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_from() -> String {
    "WeConnect <no-reply@weconnect.local>".to_string()
}

fn default_role() -> String {
    "ROLE_MEMBER".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}
