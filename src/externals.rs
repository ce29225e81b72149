//! External dependencies shared between modules.
//!
//! The root module *provides* externals: named modules pinned to an exact
//! version. Child modules *require* externals by name with a version range.
//! A requirement is satisfied when the root provides an external of that
//! name whose version falls inside the range.
//!
//! ```text
//! root:  providedExternals  { "some-library": { version: "9.8.7", module: {...} } }
//! child: requiredExternals  { "some-library": "^9.0.0" }
//! ```
//!
//! Only the root may provide externals. A child that declares
//! `providedExternals` gets a warning, never a violation.

use crate::schema::{Alternative, entries, is_callable, is_object, object};
use crate::validation::{FieldPath, Report, ValidationContext};
use crate::value::ConfigValue;
use crate::version::{VersionRange, parse_version};

/// Check the root module's `providedExternals`.
pub fn check_provided(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    entries(value, path, report, |_, entry, path, report| {
        object(entry, path, report, |fields, report| {
            let version_missing = format!("\"{}\" must be a string", path.key("version"));
            fields.required_or("version", &version_missing, report, exact_version);
            let module_missing = format!("\"{}\" must be one of [object]", path.key("module"));
            fields.required_or("module", &module_missing, report, provided_module);
        })
    })
}

fn exact_version(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    match value.as_str() {
        None => report.shape(path, "must be a string"),
        Some(version) if parse_version(version).is_err() => {
            report.shape(path, "must be a valid semantic version");
        }
        Some(_) => {}
    }
    value.clone()
}

// Callables are objects too as far as the author is concerned, hence the
// shared label.
fn provided_module(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    let keep = |v: &ConfigValue, _: &FieldPath, _: &mut Report| v.clone();
    crate::schema::alternatives(
        value,
        path,
        report,
        &[
            Alternative { label: "object", accepts: is_object, check: &keep },
            Alternative { label: "object", accepts: is_callable, check: &keep },
        ],
    )
}

/// Check a child module's `requiredExternals` against what the root provides.
///
/// Each entry yields at most one violation, checked in this order: not a
/// string, empty, not a valid range, not provided, provided version out of
/// range.
pub fn check_required(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    context: &ValidationContext,
) -> ConfigValue {
    entries(value, path, report, |name, entry, path, report| {
        let Some(raw) = entry.as_str() else {
            report.shape(path, "must be a string");
            return entry.clone();
        };
        if raw.is_empty() {
            report.shape(path, "is not allowed to be empty");
            return entry.clone();
        }
        let Ok(range) = VersionRange::parse(raw) else {
            report.shape(path, "must be a valid semantic version range");
            return entry.clone();
        };
        match context.provided_externals().get(name) {
            None => report.cross_reference(
                path,
                format!(
                    "External '{name}' is required by {}, but is not provided by the root module",
                    context.module_name()
                ),
            ),
            Some(provided) if !range.matches_str(&provided.version) => report.cross_reference(
                path,
                format!(
                    "{name}@{raw} is required by {}, but the root module provides {}",
                    context.module_name(),
                    provided.version
                ),
            ),
            Some(provided) => {
                tracing::debug!(
                    external = name,
                    range = raw,
                    provided = %provided.version,
                    "required external satisfied"
                );
            }
        }
        entry.clone()
    })
}

/// A child module declaring `providedExternals` is warned, not rejected.
pub fn warn_provided(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    context: &ValidationContext,
) -> ConfigValue {
    report.warn(
        path,
        format!(
            "Module {} attempted to provide externals. Only the root module can provide externals.",
            context.module_name()
        ),
    );
    value.clone()
}
