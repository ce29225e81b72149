//! Validation execution logic and orchestration.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::path::PathBuf;

use crate::app_config::{
    apply_state_config_validators, check_child_module_app_config, check_root_module_app_config,
    check_web_app_manifest, requires_externals,
};
use crate::config::HostConfig;
use crate::core::ModcfgError;
use crate::validation::{ProvidedExternals, ValidationContext, ValidationOutcome};

use super::command::{ConfigKind, OutputFormat, ValidateCommand};
use super::module_file::{ModuleFile, load_document};
use super::results::ValidationResults;

impl ValidateCommand {
    /// Execute the validate command.
    ///
    /// # Validation Process
    ///
    /// 1. **Host facts**: `modcfg.toml` is loaded for module kinds (not for manifests)
    /// 2. **Context**: the module's identity, the app version and shared state
    ///    are assembled into a [`ValidationContext`]
    /// 3. **Externals**: for child modules the root module is validated first
    ///    and its `providedExternals` become part of the context
    /// 4. **Output**: results are printed as text or JSON
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit host config path (`--config`)
    /// * `quiet` - Suppress text output
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the file is valid (and, in strict mode, produced no warnings)
    /// - `Err(anyhow::Error)` if:
    ///   - A file cannot be read or parsed
    ///   - No app version is known for a module config
    ///   - The root module of a child fails its own validation
    ///   - The file violates at least one rule
    ///   - Strict mode is enabled and warnings are present
    pub async fn execute_with_config(self, config_path: Option<PathBuf>, quiet: bool) -> Result<()> {
        let (label, outcome) = match self.kind {
            ConfigKind::Manifest => {
                let manifest = load_document(&self.file).await?;
                let label = self
                    .file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| self.file.display().to_string());
                (label, check_web_app_manifest(&manifest))
            }
            ConfigKind::Root | ConfigKind::Child => self.check_module(config_path).await?,
        };

        let mut results = ValidationResults::from_outcome(self.kind, &label, &outcome);
        let shape_valid = results.valid;
        if self.strict {
            results.apply_strict();
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
            OutputFormat::Text if !quiet => print_text(&results),
            OutputFormat::Text => {}
        }

        if !shape_valid {
            return Err(anyhow!(
                "Validation failed: {} violation(s) in {}",
                outcome.violations.len(),
                label
            ));
        }
        if !results.valid {
            return Err(anyhow!("Strict mode validation failed"));
        }
        Ok(())
    }

    async fn check_module(&self, config_path: Option<PathBuf>) -> Result<(String, ValidationOutcome)> {
        let host = HostConfig::load_with_optional(config_path).await?;
        let app_version = self
            .app_version
            .clone()
            .or_else(|| host.app_version.clone())
            .ok_or(ModcfgError::MissingAppVersion)?;

        let module = ModuleFile::load(&self.file).await?;
        let name = self.module_name.clone().unwrap_or_else(|| module.name.clone());
        let version = self.module_version.clone().unwrap_or_else(|| module.version.clone());

        let mut context = ValidationContext::new(name, version, app_version)
            .with_server_state_config(host.server_state_config.clone())
            .with_client_state_config(host.client_state_config.clone());

        let outcome = match self.kind {
            ConfigKind::Child => {
                let root_path = self.root.clone().or_else(|| host.root_module.clone());
                let externals = match root_path {
                    Some(path) => load_provided_externals(&path, &context).await?,
                    None => {
                        tracing::debug!("no root module given, checking against no provided externals");
                        ProvidedExternals::new()
                    }
                };
                context = context.with_provided_externals(externals);

                let outcome = check_child_module_app_config(&module.app_config, &context);
                if outcome.is_valid() {
                    if requires_externals(&outcome.value) {
                        tracing::info!(module = %context.module_label(), "module requires externals");
                    }
                    apply_state_config_validators(&outcome.value, &context)?;
                }
                outcome
            }
            _ => check_root_module_app_config(&module.app_config, &context),
        };

        Ok((context.module_label(), outcome))
    }
}

/// Validate the root module at `path` and collect what it provides.
async fn load_provided_externals(
    path: &std::path::Path,
    child_context: &ValidationContext,
) -> Result<ProvidedExternals> {
    let root = ModuleFile::load(path).await?;
    let root_context = child_context.for_module(&root.name, &root.version);
    let validated = check_root_module_app_config(&root.app_config, &root_context)
        .into_result()
        .with_context(|| format!("Root module {} failed validation", root.label()))?;

    let externals = ProvidedExternals::from_root_config(&validated);
    tracing::debug!(root = %root.label(), provided = externals.len(), "loaded provided externals");
    Ok(externals)
}

fn print_text(results: &ValidationResults) {
    if results.valid {
        println!("{} Valid {}: {}", "✓".green(), results.kind, results.module);
    } else {
        println!("{} Invalid {}: {}", "✗".red(), results.kind, results.module);
        for error in &results.errors {
            println!("{} {}", "✗".red(), error);
        }
    }
    for warning in &results.warnings {
        println!("{} Warning: {}", "⚠".yellow(), warning);
    }
}
