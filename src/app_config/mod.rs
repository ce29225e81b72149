//! Entry points for validating module configuration.
//!
//! A host loading modules validates the root module first, then every child
//! module against facts taken from the root:
//!
//! ```rust
//! use modcfg::app_config::{validate_child_module_app_config, validate_root_module_app_config};
//! use modcfg::validation::{ProvidedExternals, ValidationContext};
//! use modcfg::value::ConfigValue;
//! use serde_json::json;
//!
//! let root_context = ValidationContext::new("some-root", "1.2.3", "5.0.0");
//! let root = validate_root_module_app_config(
//!     &ConfigValue::from(json!({
//!         "csp": "default-src 'self';",
//!         "providedExternals": { "some-library": { "version": "9.8.7", "module": {} } },
//!     })),
//!     &root_context,
//! )?;
//!
//! let child_context = root_context
//!     .for_module("child-module", "1.0.0")
//!     .with_provided_externals(ProvidedExternals::from_root_config(&root));
//! let child = validate_child_module_app_config(
//!     &ConfigValue::from(json!({ "requiredExternals": { "some-library": "^9.0.0" } })),
//!     &child_context,
//! )?;
//! assert!(modcfg::app_config::requires_externals(&child));
//! # Ok::<(), modcfg::validation::ValidationError>(())
//! ```
//!
//! Each `validate_*` function runs every rule, then either returns the
//! validated value or fails with one [`ValidationError`] listing every
//! violation. The `check_*` variants return the full [`ValidationOutcome`]
//! instead, for callers that want to present violations and warnings
//! themselves.

mod child;
mod root;

pub use child::{check_child_module_app_config, validate_child_module_app_config};
pub use root::{check_root_module_app_config, validate_root_module_app_config};

use crate::core::ModcfgError;
use crate::schema::manifest;
use crate::validation::{FieldPath, Report, ValidationContext, ValidationError, ValidationOutcome};
use crate::value::ConfigValue;
use crate::version::VersionRange;

/// Name of the host application in compatibility messages.
pub const HOST_APP_NAME: &str = "one-app";

/// Validate a web app manifest on its own.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated rule.
pub fn validate_web_app_manifest(manifest: &ConfigValue) -> Result<ConfigValue, ValidationError> {
    check_web_app_manifest(manifest).into_result()
}

/// Like [`validate_web_app_manifest`], returning the full outcome.
pub fn check_web_app_manifest(manifest: &ConfigValue) -> ValidationOutcome {
    let mut report = Report::new();
    let value = manifest::check(manifest, &FieldPath::root(), &mut report);
    report.outcome(value)
}

/// `appCompatibility`: a range the host's app version must satisfy.
///
/// A malformed range is a shape violation; a well-formed one the host
/// version falls outside of is a cross-reference violation. An app version
/// that is not a semantic version never satisfies.
pub(crate) fn app_compatibility(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    context: &ValidationContext,
) -> ConfigValue {
    let Some(raw) = value.as_str() else {
        report.shape(path, "must be a string");
        return value.clone();
    };
    if raw.is_empty() {
        report.shape(path, "is not allowed to be empty");
        return value.clone();
    }
    let Ok(range) = VersionRange::parse(raw) else {
        report.shape(path, "must be a valid semantic version range");
        return value.clone();
    };
    if !range.matches_str(context.app_version()) {
        report.cross_reference(
            path,
            format!(
                "{} is not compatible with this version of {HOST_APP_NAME} ({}), it requires \"{raw}\"",
                context.module_label(),
                context.app_version()
            ),
        );
    }
    value.clone()
}

/// Whether a validated child config declares required externals.
///
/// Hosts keep a registry of such modules so they can be reloaded when the
/// root module changes what it provides.
pub fn requires_externals(validated: &ConfigValue) -> bool {
    validated.get("requiredExternals").is_some_and(|v| !v.is_null())
}

/// Run a validated child config's `validateStateConfig` callables against
/// the host's shared state.
///
/// For every declared key the client validator runs first, then the server
/// validator, each receiving the context's value for that key (`null` when
/// the host has none).
///
/// # Errors
///
/// Returns [`ModcfgError::StateConfigRejected`] for the first validator that
/// rejects its value.
pub fn apply_state_config_validators(
    validated: &ConfigValue,
    context: &ValidationContext,
) -> Result<(), ModcfgError> {
    let Some(declared) = validated.get("validateStateConfig").and_then(ConfigValue::as_object) else {
        return Ok(());
    };

    for (key, sides) in declared {
        for (side, state) in [
            ("client", context.client_state_config()),
            ("server", context.server_state_config()),
        ] {
            let Some(validator) = sides
                .get(side)
                .and_then(|s| s.get("validate"))
                .and_then(ConfigValue::as_callable)
            else {
                continue;
            };
            let current = state.get(key).cloned().unwrap_or(ConfigValue::Null);
            tracing::debug!(module = context.module_name(), key = %key, side, "running state config validator");
            validator.call(&[current]).map_err(|reason| ModcfgError::StateConfigRejected {
                module: context.module_name().to_string(),
                key: key.clone(),
                side: side.to_string(),
                reason,
            })?;
        }
    }
    Ok(())
}
