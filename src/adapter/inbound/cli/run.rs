//! Handlers for each subcommand.

use std::path::Path;

use tokio::signal;
use tracing::{error, info};

use super::{ConfigPathArg, ServeArgs};
use crate::adapter::inbound::http;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::{build_context, connect};
use crate::infrastructure::config::settings::Config;

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path)
}

/// Serve the HTTP API until Ctrl-C.
pub async fn execute_serve(args: &ServeArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
        config.validate()?;
    }
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "eventfeed starting");

    let addr = config
        .server
        .socket_addr()
        .map_err(|e| ConfigError::InvalidValue {
            field: "server.bind",
            reason: e.to_string(),
        })?;
    let pool = connect(&config)?;
    let ctx = build_context(&config, pool);

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Shutdown signal received");
    };

    http::serve(ctx, addr, shutdown).await?;
    info!("eventfeed stopped");
    Ok(())
}

/// Apply migrations and exit.
pub fn execute_migrate(args: &ConfigPathArg) -> Result<()> {
    let config = load_config(&args.config)?;
    config.init_logging();
    let pool = create_pool(&config.database.url, 1)?;
    run_migrations(&pool)?;
    info!(url = %config.database.url, "Migrations applied");
    Ok(())
}

/// Validate the configuration and print a summary.
pub fn execute_check(args: &ConfigPathArg) -> Result<()> {
    let config = load_config(&args.config)?;
    println!("Configuration OK: {}", args.config.display());
    println!("  bind:      {}", config.server.bind);
    println!("  origin:    {}", config.server.public_origin);
    println!("  database:  {}", config.database.url);
    println!("  page size: {}", config.listing.page_size);
    Ok(())
}
