//! Command-line interface for modcfg.
//!
//! The CLI is built on `clap` derive. Each command lives in its own module
//! with its own argument struct and an async `execute` method.
//!
//! # Commands
//!
//! - `validate` - Validate a root module config, a child module config or a
//!   web app manifest
//!
//! # Usage
//!
//! ```bash
//! # Validate a root module against the app version in modcfg.toml
//! modcfg validate modules/root.json --kind root
//!
//! # Validate a child module against an explicit root and app version
//! modcfg validate modules/child.json --root modules/root.json --app-version 5.0.0
//!
//! # Machine-readable output with debug logging on stderr
//! modcfg --verbose validate manifest.webmanifest --kind manifest --format json
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Suppress all output except errors
//! - `--config` - Path to the host config file (`modcfg.toml`)
//!
//! # Logging
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` wins when set;
//! otherwise `--verbose` selects `debug`, `--quiet` selects `error` and the
//! default is `warn`.

pub mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::HOST_CONFIG_ENV_VAR;

/// Runtime configuration for CLI execution.
///
/// Built from the global flags so tests and embedders can drive commands
/// without going through argument parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set (`"debug"`, `"warn"`, ...).
    pub log_level: String,

    /// Suppress text output from commands.
    pub quiet: bool,

    /// Explicit host config path.
    ///
    /// When `None`, `MODCFG_CONFIG` and then the directory search decide.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: "warn".to_string(),
            ..Self::default()
        }
    }

    /// Install the global `tracing` subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure for modcfg.
///
/// # Examples
///
/// ```bash
/// modcfg validate modules/child.json
/// modcfg --quiet validate modules/root.json --kind root --strict
/// modcfg --config ./ci/modcfg.toml validate modules/child.json --format json
/// ```
#[derive(Parser)]
#[command(
    name = "modcfg",
    about = "Validate module configurations for a modular application host",
    version,
    long_about = "modcfg checks the appConfig of root and child modules, and web app \
                  manifests, against the rules the host enforces when it loads them."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output with debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the host config file.
    ///
    /// Overrides `MODCFG_CONFIG` and the search for `modcfg.toml` in the
    /// current directory and its parents.
    #[arg(short, long, global = true, env = HOST_CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

/// Available modcfg commands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a module config file or web app manifest.
    ///
    /// See [`validate::ValidateCommand`] for detailed options and behavior.
    Validate(validate::ValidateCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    ///
    /// - **Verbose mode**: `debug`
    /// - **Quiet mode**: `error`
    /// - **Default mode**: `warn`, so validation warnings still show
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clap::Parser;
    /// use modcfg::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["modcfg", "--verbose", "validate", "child.json"]);
    /// assert_eq!(cli.build_config().log_level, "debug");
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with a specific configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Validate(cmd) => cmd.execute_with_config(config.config_path, config.quiet).await,
        }
    }
}
