//! Reading module files from disk.
//!
//! A module file is a JSON object:
//!
//! ```json
//! {
//!   "name": "child-module",
//!   "version": "1.2.3",
//!   "appConfig": { "appCompatibility": "^5.0.0" }
//! }
//! ```
//!
//! `name` defaults to the file stem and `version` to `0.0.0`. A file without
//! `appConfig` has nothing to validate and is treated as an empty config.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::constants::DEFAULT_MODULE_VERSION;
use crate::core::ModcfgError;
use crate::value::ConfigValue;

#[derive(Debug, Deserialize)]
struct RawModuleFile {
    name: Option<String>,
    version: Option<String>,
    #[serde(rename = "appConfig")]
    app_config: Option<ConfigValue>,
}

/// A module's identity and its undecoded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleFile {
    pub name: String,
    pub version: String,
    pub app_config: ConfigValue,
}

impl ModuleFile {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read module file {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Parse module file `content`; `path` supplies the default name and error context.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawModuleFile =
            serde_json::from_str(content).map_err(|e| ModcfgError::ModuleParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let name = match raw.name {
            Some(name) => name,
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        Ok(Self {
            name,
            version: raw.version.unwrap_or_else(|| DEFAULT_MODULE_VERSION.to_string()),
            app_config: raw.app_config.unwrap_or_else(|| ConfigValue::object::<&str, ConfigValue, _>([])),
        })
    }

    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// Read a JSON document (such as a web app manifest) as a [`ConfigValue`].
pub async fn load_document(path: &Path) -> Result<ConfigValue> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content).map_err(|e| ModcfgError::ModuleParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(value)
}
