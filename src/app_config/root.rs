//! Root module configuration.

use super::app_compatibility;
use crate::externals;
use crate::schema::{
    Alternative, array, formats, function, is_regex, is_string, number, object, pwa, regex,
    safe_request, state_config, string,
};
use crate::validation::{FieldPath, Report, ValidationContext, ValidationError, ValidationOutcome};
use crate::value::ConfigValue;

const MISSING_CSP: &str = "\"csp\" must provide a valid content security policy in the Root module";

/// Validate the root module's `appConfig`.
///
/// Fields are checked in this order, every rule running regardless of
/// earlier failures:
///
/// | field | rule |
/// |-------|------|
/// | `providedExternals` | name -> `{ version, module }` |
/// | `provideStateConfig` | name -> `{ server, client }` |
/// | `csp` | required string |
/// | `corsOrigins` | array of regexes, hostnames or origin strings |
/// | `configureRequestLog` | callable |
/// | `extendSafeRequestRestrictedAttributes` | `{ headers, cookies }` |
/// | `pwa` | PWA settings and web manifest |
/// | `createSsrFetch` | callable |
/// | `eventLoopDelayThreshold` | number, `Infinity` allowed |
/// | `appCompatibility` | range satisfied by the app version |
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated rule.
pub fn validate_root_module_app_config(
    config: &ConfigValue,
    context: &ValidationContext,
) -> Result<ConfigValue, ValidationError> {
    check_root_module_app_config(config, context).into_result()
}

/// Like [`validate_root_module_app_config`], returning the full outcome.
pub fn check_root_module_app_config(
    config: &ConfigValue,
    context: &ValidationContext,
) -> ValidationOutcome {
    tracing::debug!(module = %context.module_label(), "validating root module config");
    let mut report = Report::new();
    let value = object(config, &FieldPath::root(), &mut report, |fields, report| {
        fields.optional("providedExternals", report, externals::check_provided);
        fields.optional("provideStateConfig", report, state_config::check_provided);
        fields.required_or("csp", MISSING_CSP, report, string);
        fields.optional("corsOrigins", report, |v, p, r| array(v, p, r, cors_origin));
        fields.optional("configureRequestLog", report, |v, p, r| function(v, p, r, None));
        fields.optional("extendSafeRequestRestrictedAttributes", report, safe_request::check);
        fields.optional("pwa", report, pwa::check);
        fields.optional("createSsrFetch", report, |v, p, r| function(v, p, r, None));
        fields.optional("eventLoopDelayThreshold", report, |v, p, r| number(v, p, r, true));
        fields.optional("appCompatibility", report, |v, p, r| {
            app_compatibility(v, p, r, context)
        });
    });
    tracing::debug!(
        module = %context.module_label(),
        violations = report.violation_count(),
        "root module config checked"
    );
    report.outcome(value)
}

fn hostname(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    if !value.as_str().is_some_and(formats::is_hostname) {
        report.shape(path, "must be a valid hostname");
    }
    value.clone()
}

fn origin(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    if !value.as_str().is_some_and(formats::is_origin_fragment) {
        report.shape(path, "fails to match the origin pattern");
    }
    value.clone()
}

// Whatever the reason an origin is rejected, authors get the same message.
fn cors_origin(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    let mut attempt = Report::new();
    let validated = crate::schema::alternatives(
        value,
        path,
        &mut attempt,
        &[
            Alternative { label: "object", accepts: is_regex, check: &regex },
            Alternative { label: "string", accepts: is_string, check: &hostname },
            Alternative { label: "string", accepts: is_string, check: &origin },
        ],
    );
    if attempt.has_violations() {
        report.shape(path, "does not match any of the allowed types");
    }
    validated
}
