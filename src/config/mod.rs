//! Host configuration (`modcfg.toml`).
//!
//! The engine itself is pure: everything it needs arrives in a
//! [`ValidationContext`](crate::validation::ValidationContext). When modcfg
//! runs from the command line, the host facts a module loader would normally
//! supply come from this file instead.
//!
//! # Location
//!
//! 1. The path given with `--config`
//! 2. The path in the `MODCFG_CONFIG` environment variable
//! 3. `modcfg.toml` in the current directory or the nearest parent
//!
//! A missing file is not an error unless it was asked for explicitly.
//!
//! # Format
//!
//! ```toml
//! # Version of the host application, checked against `appCompatibility`
//! app_version = "5.0.0"
//!
//! # Root module file whose `providedExternals` child modules are checked against.
//! # Relative paths are resolved from the directory holding modcfg.toml.
//! root_module = "modules/root.json"
//!
//! [server_state_config]
//! cdnUrl = "https://cdn.example.com/"
//!
//! [client_state_config]
//! cdnUrl = "https://cdn.example.com/"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{HOST_CONFIG_ENV_VAR, HOST_CONFIG_FILE_NAME};
use crate::core::ModcfgError;
use crate::value::ConfigMap;

/// Facts about the host application, as read from `modcfg.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Host application version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    /// Root module file used when validating child modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_module: Option<PathBuf>,

    /// Shared state visible to server-side validators.
    #[serde(default, skip_serializing_if = "ConfigMap::is_empty")]
    pub server_state_config: ConfigMap,

    /// Shared state visible to client-side validators.
    #[serde(default, skip_serializing_if = "ConfigMap::is_empty")]
    pub client_state_config: ConfigMap,
}

impl HostConfig {
    /// Load the host config from its usual locations.
    ///
    /// Returns the default (empty) config when no file is found by the
    /// directory search.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file does not exist, or if
    /// the file found cannot be read or parsed.
    pub async fn load_with_optional(explicit: Option<PathBuf>) -> Result<Self> {
        match locate(explicit)? {
            Some(path) => Self::load_from(&path).await,
            None => {
                tracing::debug!("no {HOST_CONFIG_FILE_NAME} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load the host config from `path`.
    ///
    /// A relative `root_module` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid host config TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read host config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ModcfgError::HostConfigError {
            file: path.display().to_string(),
            reason: e.message().to_string(),
        })?;

        if let Some(root) = config.root_module.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.root_module = Some(if root.is_relative() { base.join(root) } else { root });
        }

        tracing::debug!(path = %path.display(), "loaded host config");
        Ok(config)
    }
}

/// Find the host config file to use, if any.
///
/// # Errors
///
/// Returns [`ModcfgError::HostConfigNotFound`] when a path given with
/// `--config` or `MODCFG_CONFIG` does not exist.
pub fn locate(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let requested = explicit.or_else(|| std::env::var_os(HOST_CONFIG_ENV_VAR).map(PathBuf::from));
    if let Some(path) = requested {
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(ModcfgError::HostConfigNotFound)
            .with_context(|| format!("Host config {} does not exist", path.display()));
    }

    let current = std::env::current_dir().context("Cannot determine current working directory")?;
    Ok(find_from(&current))
}

/// Search `start` and its ancestors for `modcfg.toml`.
pub fn find_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(HOST_CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
