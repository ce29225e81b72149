//! Root-then-child validation, the way a module loader drives it.

use modcfg::app_config::{
    apply_state_config_validators, requires_externals, validate_child_module_app_config,
    validate_root_module_app_config,
};
use modcfg::core::ModcfgError;
use modcfg::test_utils::{init_test_logging, root_context};
use modcfg::validation::ProvidedExternals;
use modcfg::value::ConfigValue;
use serde_json::json;

fn validated_root() -> ConfigValue {
    let root = ConfigValue::from(json!({
        "csp": "default-src 'self';",
        "providedExternals": {
            "some-library": { "version": "9.8.7", "module": {} },
            "other-library": { "version": "2.0.0", "module": {} }
        },
        "appCompatibility": "^5.0.0"
    }));
    validate_root_module_app_config(&root, &root_context()).unwrap()
}

fn state_validator(expected: &'static str) -> ConfigValue {
    let validate = ConfigValue::function(1, move |args| match args.first().and_then(ConfigValue::as_str) {
        Some(value) if value == expected => Ok(ConfigValue::Bool(true)),
        _ => Err(format!("expected {expected}")),
    });
    ConfigValue::object([("validate", validate)])
}

#[test]
fn test_child_sees_what_root_provides() {
    init_test_logging(None);
    let provided = ProvidedExternals::from_root_config(&validated_root());
    assert_eq!(provided.len(), 2);

    let context = root_context().for_module("child-module", "1.2.3").with_provided_externals(provided);
    let child = ConfigValue::from(json!({
        "requiredExternals": { "some-library": "^9.8.0", "other-library": "2.x" }
    }));

    let validated = validate_child_module_app_config(&child, &context).unwrap();
    assert!(requires_externals(&validated));
}

#[test]
fn test_child_without_required_externals() {
    let provided = ProvidedExternals::from_root_config(&validated_root());
    let context = root_context().for_module("plain-module", "1.0.0").with_provided_externals(provided);

    let validated = validate_child_module_app_config(&ConfigValue::from(json!({})), &context).unwrap();
    assert!(!requires_externals(&validated));

    let explicit_null = ConfigValue::from(json!({ "requiredExternals": null }));
    assert!(!requires_externals(&explicit_null));
}

#[test]
fn test_state_config_validators_against_host_state() {
    let context = root_context().for_module("child-module", "1.2.3");
    let child = ConfigValue::object([(
        "validateStateConfig",
        ConfigValue::object([(
            "cdnUrl",
            ConfigValue::object([
                ("client", state_validator("https://cdn.example.com/")),
                ("server", state_validator("https://cdn.example.com/")),
            ]),
        )]),
    )]);

    let validated = validate_child_module_app_config(&child, &context).unwrap();
    assert!(apply_state_config_validators(&validated, &context).is_ok());
}

#[test]
fn test_state_config_validator_rejects_host_state() {
    let context = root_context().for_module("child-module", "1.2.3");
    let child = ConfigValue::object([(
        "validateStateConfig",
        ConfigValue::object([(
            "cdnUrl",
            ConfigValue::object([("client", state_validator("https://other-cdn.example.com/"))]),
        )]),
    )]);

    let validated = validate_child_module_app_config(&child, &context).unwrap();
    let err = apply_state_config_validators(&validated, &context).unwrap_err();
    assert!(matches!(err, ModcfgError::StateConfigRejected { .. }));
    assert_eq!(
        err.to_string(),
        "Module child-module rejected client state config 'cdnUrl': expected https://other-cdn.example.com/"
    );
}
