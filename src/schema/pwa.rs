//! Progressive web app settings of the root module.
//!
//! `webManifest` is either the manifest itself or a factory producing it.
//! A factory is called once, with no arguments, and what it returns is held
//! to the same rules as an inline manifest (violations are reported under
//! `pwa.webManifest`). The validated config keeps the factory, not its
//! output, so the host can call it again when it serves the manifest.

use super::{boolean, formats, manifest, object, pattern};
use crate::validation::{FieldPath, Report};
use crate::value::ConfigValue;

pub fn check(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    object(value, path, report, |fields, report| {
        fields.optional("serviceWorker", report, boolean);
        fields.optional("recoveryMode", report, boolean);
        fields.optional("escapeHatch", report, boolean);
        fields.optional("scope", report, |v, p, r| {
            pattern(v, p, r, formats::is_root_relative, formats::ROOT_RELATIVE_PATTERN)
        });
        fields.optional("webManifest", report, web_manifest);
    })
}

fn web_manifest(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    match value {
        ConfigValue::Object(_) => manifest::check(value, path, report),
        ConfigValue::Function(factory) => {
            match factory.call(&[]) {
                Ok(produced) => {
                    tracing::debug!(path = %path, "validating web manifest produced by factory");
                    manifest::check(&produced, path, report);
                }
                Err(reason) => {
                    report.shape(path, format!("failed to produce a web manifest: {reason}"));
                }
            }
            value.clone()
        }
        _ => {
            report.shape(path, "must be one of [object]");
            value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(value: ConfigValue) -> (ConfigValue, Vec<String>) {
        let mut report = Report::new();
        let out = check(&value, &FieldPath::root().key("pwa"), &mut report);
        (out, report.violations().iter().map(|v| v.message.clone()).collect())
    }

    #[test]
    fn test_rules_in_declared_order() {
        let value = ConfigValue::from(json!({
            "serviceWorker": "true",
            "escapeHatch": 0,
            "recoveryMode": [],
            "scope": "\\",
        }));
        let (out, found) = run(value);
        assert_eq!(
            found,
            vec![
                r#""pwa.recoveryMode" must be a boolean"#,
                r#""pwa.escapeHatch" must be a boolean"#,
                r#""pwa.scope" with value "\" fails to match the required pattern: /^\//"#,
            ]
        );
        assert_eq!(out.get("serviceWorker"), Some(&ConfigValue::Bool(true)));
    }

    #[test]
    fn test_manifest_factory_output_is_validated() {
        let factory = ConfigValue::function(0, |_| Ok(ConfigValue::from(json!({ "short_name": "One App Test" }))));
        let (out, found) = run(ConfigValue::Null.with("webManifest", factory.clone()));
        assert_eq!(found, vec![r#""pwa.webManifest.name" is required"#]);
        assert_eq!(out.get("webManifest"), Some(&factory));
    }

    #[test]
    fn test_failing_factory() {
        let factory = ConfigValue::function(0, |_| Err("manifest service unavailable".to_string()));
        let (_, found) = run(ConfigValue::Null.with("webManifest", factory));
        assert_eq!(
            found,
            vec![r#""pwa.webManifest" failed to produce a web manifest: manifest service unavailable"#]
        );
    }

    #[test]
    fn test_manifest_of_wrong_type() {
        let (_, found) = run(ConfigValue::from(json!({ "webManifest": "manifest.json" })));
        assert_eq!(found, vec![r#""pwa.webManifest" must be one of [object]"#]);
    }

    #[test]
    fn test_inline_manifest() {
        let (_, found) = run(ConfigValue::from(json!({ "scope": "/", "webManifest": { "name": "One App Test" } })));
        assert!(found.is_empty());
    }
}
