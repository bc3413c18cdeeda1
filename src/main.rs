/// WeConnect verification service - main entry point
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use verification_service::{
    config::Config,
    handlers,
    security::{revocation, JwtKeys, RandomOtp, RevocationRegistry},
    services::{AccountService, NoopNotifier, Notifier, SmtpNotifier},
    store::MemoryStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().context("Failed to load configuration from environment")?;

    tracing::info!(
        "Starting verification service on {}:{}",
        config.server_host,
        config.server_port
    );

    let notifier: Arc<dyn Notifier> = if config.smtp_host.trim().is_empty() {
        tracing::warn!("SMTP host not configured; email delivery disabled");
        Arc::new(NoopNotifier)
    } else {
        Arc::new(SmtpNotifier::from_config(&config).context("Failed to build SMTP notifier")?)
    };

    let jwt = Arc::new(JwtKeys::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_hours,
    ));
    let revocations = Arc::new(RevocationRegistry::new());
    let store = Arc::new(MemoryStore::new());

    let accounts = AccountService::new(
        store,
        notifier,
        Arc::new(RandomOtp),
        Arc::clone(&jwt),
        Arc::clone(&revocations),
        config.default_role.clone(),
        config.strict_notifier,
    );

    let sweeper = revocation::spawn_sweeper(
        Arc::clone(&revocations),
        Duration::from_secs(config.sweep_interval_secs),
    );
    tracing::info!(
        period_secs = config.sweep_interval_secs,
        "Revocation sweep task started"
    );

    let state = AppState {
        accounts,
        jwt,
        revocations,
    };
    let app = handlers::router(state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("REST API listening on {}", addr);

    axum::serve(listener, app).await?;

    sweeper.abort();
    Ok(())
}
