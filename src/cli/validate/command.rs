//! Command structure and output format definitions for validation.

use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Command to validate a module configuration or web app manifest file.
///
/// # Examples
///
/// ```rust,ignore
/// use modcfg::cli::validate::{ConfigKind, OutputFormat, ValidateCommand};
///
/// // Child module checked against an explicit root module
/// let cmd = ValidateCommand {
///     file: "modules/child.json".into(),
///     kind: ConfigKind::Child,
///     root: Some("modules/root.json".into()),
///     app_version: Some("5.0.0".to_string()),
///     module_name: None,
///     module_version: None,
///     format: OutputFormat::Json,
///     strict: true,
/// };
/// ```
#[derive(Args, Debug, Clone)]
pub struct ValidateCommand {
    /// Module file (JSON) or web app manifest to validate
    ///
    /// Module files hold `name`, `version` and `appConfig`; only `appConfig`
    /// is validated. Manifest files are the manifest object itself.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// What the file contains
    #[arg(long, value_enum, default_value = "child")]
    pub kind: ConfigKind,

    /// Root module file providing externals to a child module
    ///
    /// Defaults to `root_module` from modcfg.toml.
    #[arg(long, value_name = "FILE")]
    pub root: Option<PathBuf>,

    /// Host application version checked against `appCompatibility`
    ///
    /// Defaults to `app_version` from modcfg.toml.
    #[arg(long)]
    pub app_version: Option<String>,

    /// Module name used in messages (defaults to the file's `name`, then its stem)
    #[arg(long)]
    pub module_name: Option<String>,

    /// Module version used in messages (defaults to the file's `version`)
    #[arg(long)]
    pub module_version: Option<String>,

    /// Output format: text or json
    ///
    /// - `text`: Human-readable output with colors and formatting
    /// - `json`: Structured JSON output suitable for automation
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Strict mode (treat warnings as errors)
    ///
    /// A child module declaring `providedExternals` only warns; in strict
    /// mode that warning fails the run.
    #[arg(long)]
    pub strict: bool,
}

/// Output format options for validation results.
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output with colors (✓, ✗, ⚠ symbols).
    Text,

    /// Structured JSON output for automation.
    Json,
}

/// The kind of configuration being validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    /// Root module `appConfig`
    Root,
    /// Child module `appConfig`
    Child,
    /// Web app manifest
    Manifest,
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root module config",
            Self::Child => "child module config",
            Self::Manifest => "web app manifest",
        })
    }
}
