//! relayd - multi-room line chat relay.

use relayd::config::{Config, validate};
use relayd::network::Gateway;
use relayd::state::{DispatchConfig, Dispatcher};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("Refusing to start with {} configuration error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        prune_empty_rooms = config.rooms.prune_empty,
        "Starting relayd"
    );

    let (dispatcher, _dispatcher_task) = Dispatcher::spawn(DispatchConfig::from(&config));

    let gateway = Gateway::bind(config.listen.address, dispatcher, config.limits.clone())
        .await
        .map_err(|e| {
            error!(address = %config.listen.address, error = %e, "Unable to start server");
            e
        })?;

    tokio::select! {
        result = gateway.run() => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received, no longer accepting connections");
        }
    }

    Ok(())
}
