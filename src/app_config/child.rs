//! Child module configuration.

use super::app_compatibility;
use crate::externals;
use crate::schema::{object, safe_request, state_config};
use crate::validation::{FieldPath, Report, ValidationContext, ValidationError, ValidationOutcome};
use crate::value::ConfigValue;

/// Validate a child module's `appConfig`.
///
/// `requiredExternals` is checked against the provided externals in
/// `context`, which the caller copies from the root module. Declaring
/// `providedExternals` in a child is logged as a warning and otherwise
/// ignored.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated rule.
pub fn validate_child_module_app_config(
    config: &ConfigValue,
    context: &ValidationContext,
) -> Result<ConfigValue, ValidationError> {
    check_child_module_app_config(config, context).into_result()
}

/// Like [`validate_child_module_app_config`], returning the full outcome.
pub fn check_child_module_app_config(
    config: &ConfigValue,
    context: &ValidationContext,
) -> ValidationOutcome {
    tracing::debug!(
        module = %context.module_label(),
        provided_externals = context.provided_externals().len(),
        "validating child module config"
    );
    let mut report = Report::new();
    let value = object(config, &FieldPath::root(), &mut report, |fields, report| {
        fields.optional("providedExternals", report, |v, p, r| {
            externals::warn_provided(v, p, r, context)
        });
        fields.optional("requiredExternals", report, |v, p, r| {
            externals::check_required(v, p, r, context)
        });
        fields.optional("validateStateConfig", report, state_config::check_validators);
        fields.optional("requiredSafeRequestRestrictedAttributes", report, safe_request::check);
        fields.optional("appCompatibility", report, |v, p, r| {
            app_compatibility(v, p, r, context)
        });
    });
    tracing::debug!(
        module = %context.module_label(),
        violations = report.violation_count(),
        warnings = report.warnings().len(),
        "child module config checked"
    );
    report.outcome(value)
}
