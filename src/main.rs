//! Parking membership server entry point.
//!
//! Loads configuration from the environment, wires the in-memory adapters
//! into the registry and serves the REST API until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use parking_membership::adapters::http::{api_router, RegistryAppState};
use parking_membership::adapters::{
    InMemoryEventBus, InMemoryFeeToken, InMemoryMemberRepository, SystemClock,
};
use parking_membership::application::{MembershipRegistry, RegistryPorts};
use parking_membership::config::{AppConfig, LogFormat};
use parking_membership::domain::foundation::{AccountId, TokenAmount};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let settings = config.registry_settings()?;
    let registry_account = settings.registry_account.clone();

    let token = Arc::new(InMemoryFeeToken::new(
        AccountId::new(config.registry.minter_account.as_str())?,
        config.registry.token_symbol.as_str(),
        config.registry.token_decimals,
    ));
    seed_accounts(&config, &token, &registry_account).await?;
    tracing::info!(
        symbol = token.symbol(),
        decimals = token.decimals(),
        total_supply = %token.total_supply().await,
        "Fee token ready"
    );

    let registry = MembershipRegistry::new(
        RegistryPorts {
            repository: Arc::new(InMemoryMemberRepository::new()),
            token,
            clock: Arc::new(SystemClock),
            event_publisher: Arc::new(InMemoryEventBus::new()),
        },
        settings,
    );

    let app = api_router(RegistryAppState::new(Arc::new(registry))).layer(TimeoutLayer::new(
        Duration::from_secs(config.server.request_timeout_secs),
    ));

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        registry = %registry_account,
        "Parking membership API listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.as_str()));

    match config.server.effective_log_format() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Mints the configured balance to each seed account and gives the
/// registry an unlimited allowance over it.
async fn seed_accounts(
    config: &AppConfig,
    token: &InMemoryFeeToken,
    registry_account: &AccountId,
) -> Result<(), Box<dyn std::error::Error>> {
    let accounts = config.registry.seed_accounts_list();
    if accounts.is_empty() {
        return Ok(());
    }

    let balance = config
        .registry
        .seed_balance()
        .ok_or("seed balance overflows the token range")?;
    let minter = AccountId::new(config.registry.minter_account.as_str())?;

    for name in accounts {
        let account = AccountId::new(name)?;
        token.mint(&minter, &account, balance).await?;
        token.approve(&account, registry_account, TokenAmount::MAX).await;
        tracing::info!(account = %account, balance = %balance, "Seeded account");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
