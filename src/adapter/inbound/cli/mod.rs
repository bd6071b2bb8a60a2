//! Command-line interface definitions.

pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// eventfeed - event listing and filter-state backend.
#[derive(Parser, Debug)]
#[command(name = "eventfeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API (foreground)
    Serve(ServeArgs),

    /// Apply pending database migrations and exit
    Migrate(ConfigPathArg),

    /// Validate the configuration file
    Check(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override listen address (host:port)
    #[arg(long)]
    pub bind: Option<String>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults_to_config_toml() {
        let cli = Cli::parse_from(["eventfeed", "serve"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(args.bind.is_none());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::parse_from([
            "eventfeed",
            "serve",
            "--config",
            "prod.toml",
            "--bind",
            "0.0.0.0:8080",
            "--json-logs",
        ]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config, PathBuf::from("prod.toml"));
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
        assert!(args.json_logs);
    }
}
