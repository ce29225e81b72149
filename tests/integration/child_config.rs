use modcfg::app_config::{check_child_module_app_config, validate_child_module_app_config};
use modcfg::test_utils::{child_context, init_test_logging};
use modcfg::validation::ViolationKind;
use modcfg::value::ConfigValue;
use serde_json::json;

fn always_valid() -> ConfigValue {
    ConfigValue::function(1, |_| Ok(ConfigValue::Bool(true)))
}

#[test]
fn test_valid_child_config_is_returned_unchanged() {
    init_test_logging(None);
    let side = ConfigValue::object([("validate", always_valid())]);
    let config = ConfigValue::from(json!({
        "appCompatibility": "5.0.0",
        "requiredSafeRequestRestrictedAttributes": {
            "headers": ["accept"],
            "cookies": ["macadamia"]
        },
        "requiredExternals": { "some-library": "9.8.7" }
    }))
    .with(
        "validateStateConfig",
        ConfigValue::object([(
            "apiUrl",
            ConfigValue::object([("server", side.clone()), ("client", side)]),
        )]),
    );

    let validated = validate_child_module_app_config(&config, &child_context()).unwrap();
    assert_eq!(validated, config);
}

#[test]
fn test_invalid_child_config_lists_every_violation() {
    init_test_logging(None);
    let config = ConfigValue::from(json!({
        "appCompatibility": "1.0.0",
        "providedExternals": {}
    }))
    .with("validateStateConfig", ConfigValue::function(0, |_| Ok(ConfigValue::Bool(true))))
    .with(
        "requiredSafeRequestRestrictedAttributes",
        ConfigValue::from(json!({ "headers": {}, "cookies": 9 })),
    )
    .with(
        "requiredExternals",
        ConfigValue::from(json!({
            "some-library": "3.2.1",
            "some-other-library": { "version": "3.2.1" }
        })),
    );

    let err = validate_child_module_app_config(&config, &child_context()).unwrap_err();
    let expected = [
        "some-library@3.2.1 is required by child-module, but the root module provides 9.8.7",
        r#""requiredExternals.some-other-library" must be a string"#,
        r#""validateStateConfig" must be of type object"#,
        r#""requiredSafeRequestRestrictedAttributes.headers" must be an array"#,
        r#""requiredSafeRequestRestrictedAttributes.cookies" must be an array"#,
        r#"child-module@1.2.3 is not compatible with this version of one-app (5.0.0), it requires "1.0.0""#,
    ];
    assert_eq!(err.to_string(), expected.join(". "));

    let kinds: Vec<ViolationKind> = err.violations().iter().map(|v| v.kind).collect();
    assert_eq!(kinds[0], ViolationKind::CrossReference);
    assert_eq!(kinds[1], ViolationKind::Shape);
    assert_eq!(kinds[5], ViolationKind::CrossReference);
}

#[test]
fn test_missing_external() {
    let config = ConfigValue::from(json!({
        "requiredExternals": { "not-provided": "^1.0.0" }
    }));

    let err = validate_child_module_app_config(&config, &child_context()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "External 'not-provided' is required by child-module, but is not provided by the root module"
    );
}

#[test]
fn test_invalid_required_range() {
    let config = ConfigValue::from(json!({
        "requiredExternals": { "some-library": "not a range" }
    }));

    let err = validate_child_module_app_config(&config, &child_context()).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#""requiredExternals.some-library" must be a valid semantic version range"#
    );
}

#[test]
fn test_range_forms_satisfied_by_provided_version() {
    for range in ["^9.0.0", "~9.8.0", ">=9.0.0 <10.0.0", "9.x", "*", "1.0.0 || 9.8.7"] {
        let config = ConfigValue::object([("requiredExternals", ConfigValue::object([("some-library", range)]))]);
        let result = validate_child_module_app_config(&config, &child_context());
        assert!(result.is_ok(), "{range}: {result:?}");
    }
}

#[test]
fn test_provided_externals_only_warn() {
    let config = ConfigValue::from(json!({
        "providedExternals": { "other-library": { "version": "1.0.0", "module": {} } }
    }));

    let outcome = check_child_module_app_config(&config, &child_context());
    assert!(outcome.is_valid());
    assert_eq!(
        outcome.warning_messages(),
        vec![
            "Module child-module attempted to provide externals. Only the root module can provide externals."
                .to_string()
        ]
    );
    assert_eq!(outcome.into_result().unwrap(), config);
}

#[test]
fn test_validator_arity() {
    let side = ConfigValue::object([("validate", ConfigValue::function(2, |_| Ok(ConfigValue::Null)))]);
    let config = ConfigValue::object([(
        "validateStateConfig",
        ConfigValue::object([("cdnUrl", ConfigValue::object([("client", side)]))]),
    )]);

    let err = validate_child_module_app_config(&config, &child_context()).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#""validateStateConfig.cdnUrl.client.validate" must have an arity lesser or equal to 1"#
    );
}

#[test]
fn test_validating_twice_gives_the_same_config() {
    let side = ConfigValue::object([("validate", always_valid())]);
    let config = ConfigValue::from(json!({
        "appCompatibility": ">=5.0.0",
        "requiredSafeRequestRestrictedAttributes": { "headers": ["accept"], "cookies": [] },
        "requiredExternals": { "some-library": "^9.0.0" }
    }))
    .with("validateStateConfig", ConfigValue::object([("cdnUrl", ConfigValue::object([("client", side)]))]));

    let once = validate_child_module_app_config(&config, &child_context()).unwrap();
    let twice = validate_child_module_app_config(&once, &child_context()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_empty_ranges_are_rejected() {
    let config = ConfigValue::from(json!({
        "requiredExternals": { "some-library": "" },
        "appCompatibility": ""
    }));

    let err = validate_child_module_app_config(&config, &child_context()).unwrap_err();
    let expected = [
        r#""requiredExternals.some-library" is not allowed to be empty"#,
        r#""appCompatibility" is not allowed to be empty"#,
    ];
    assert_eq!(err.to_string(), expected.join(". "));
}
