use modcfg::app_config::validate_root_module_app_config;
use modcfg::test_utils::{init_test_logging, root_context};
use modcfg::value::ConfigValue;
use serde_json::json;

fn valid_root_config() -> ConfigValue {
    let externals = json!({
        "some-library": { "version": "9.8.7", "module": {} }
    });
    let state = json!({
        "randomApi": {
            "server": "https://api.example.com",
            "client": "https://example.com/api"
        },
        "clientValue": { "client": "only-for-client", "server": null }
    });

    ConfigValue::object::<&str, ConfigValue, _>([])
        .with("appCompatibility", "5.0.0")
        .with("providedExternals", ConfigValue::from(externals))
        .with("provideStateConfig", ConfigValue::from(state))
        .with("csp", "default-src 'self';")
        .with("corsOrigins", vec![ConfigValue::regex(r"example\.com").unwrap()])
        .with("eventLoopDelayThreshold", f64::INFINITY)
        .with(
            "pwa",
            ConfigValue::from(json!({
                "serviceWorker": true,
                "escapeHatch": false,
                "recoveryMode": false,
                "scope": "/",
                "webManifest": { "name": "One App Test" }
            })),
        )
}

#[test]
fn test_valid_root_config_is_returned_unchanged() {
    init_test_logging(None);
    let config = valid_root_config();

    let validated = validate_root_module_app_config(&config, &root_context()).unwrap();
    assert_eq!(validated, config);
}

#[test]
fn test_invalid_root_config_lists_every_violation() {
    init_test_logging(None);
    let pwa = ConfigValue::from(json!({
        "serviceWorker": "true",
        "escapeHatch": 0,
        "recoveryMode": [],
        "scope": "\\"
    }))
    .with(
        "webManifest",
        ConfigValue::function(0, |_| Ok(ConfigValue::from(json!({ "short_name": "One App Test" })))),
    );

    let safe_request = ConfigValue::from(json!({ "headers": [87] }))
        .with("cookies", vec![ConfigValue::regex("cookie").unwrap()])
        .with("notAValidKey", ConfigValue::Null);

    let config = ConfigValue::from(json!({
        "providedExternals": {
            "some-library": { "version": 9, "module": null }
        },
        "corsOrigins": ["/"],
        "provideStateConfig": {
            "missingKey": { "client": "is missing the server key" }
        },
        "configureRequestLog": false,
        "eventLoopDelayThreshold": "Infinity",
        "createSsrFetch": null
    }))
    .with("extendSafeRequestRestrictedAttributes", safe_request)
    .with("pwa", pwa)
    .with("appCompatibility", "1.0.0");

    let err = validate_root_module_app_config(&config, &root_context()).unwrap_err();
    let expected = [
        r#""providedExternals.some-library.version" must be a string"#,
        r#""providedExternals.some-library.module" must be one of [object]"#,
        r#""provideStateConfig.missingKey.server" is required"#,
        r#""csp" must provide a valid content security policy in the Root module"#,
        r#""corsOrigins[0]" does not match any of the allowed types"#,
        r#""configureRequestLog" must be of type function"#,
        r#""extendSafeRequestRestrictedAttributes.headers[0]" must be a string"#,
        r#""extendSafeRequestRestrictedAttributes.cookies[0]" must be a string"#,
        r#""extendSafeRequestRestrictedAttributes.notAValidKey" is not allowed"#,
        r#""pwa.recoveryMode" must be a boolean"#,
        r#""pwa.escapeHatch" must be a boolean"#,
        r#""pwa.scope" with value "\" fails to match the required pattern: /^\//"#,
        r#""pwa.webManifest.name" is required"#,
        r#""createSsrFetch" must be of type function"#,
        r#""eventLoopDelayThreshold" must be a number"#,
        r#"some-root@1.2.3 is not compatible with this version of one-app (5.0.0), it requires "1.0.0""#,
    ];
    assert_eq!(err.to_string(), expected.join(". "));
    assert_eq!(err.violations().len(), expected.len());
}

#[test]
fn test_conversions_apply_to_returned_config() {
    let config = ConfigValue::from(json!({
        "csp": "default-src 'self';",
        "eventLoopDelayThreshold": "250",
        "pwa": { "serviceWorker": "TRUE" }
    }));

    let validated = validate_root_module_app_config(&config, &root_context()).unwrap();
    assert_eq!(validated.get("eventLoopDelayThreshold"), Some(&ConfigValue::Number(250.0)));
    assert_eq!(
        validated.get("pwa").and_then(|pwa| pwa.get("serviceWorker")),
        Some(&ConfigValue::Bool(true))
    );
}

#[test]
fn test_cors_origin_forms() {
    let config = ConfigValue::from(json!({
        "csp": "default-src 'self';",
        "corsOrigins": ["example.com", "https://example.com", "127.0.0.1"]
    }));
    assert!(validate_root_module_app_config(&config, &root_context()).is_ok());
}

#[test]
fn test_manifest_factory_is_kept() {
    let factory = ConfigValue::function(0, |_| Ok(ConfigValue::from(json!({ "name": "One App" }))));
    let config = ConfigValue::object([("csp", ConfigValue::from("default-src 'self';"))])
        .with("pwa", ConfigValue::object([("webManifest", factory.clone())]));

    let validated = validate_root_module_app_config(&config, &root_context()).unwrap();
    assert_eq!(
        validated.get("pwa").and_then(|pwa| pwa.get("webManifest")),
        Some(&factory)
    );
}

#[test]
fn test_validating_twice_gives_the_same_config() {
    let factory = ConfigValue::function(0, |_| Ok(ConfigValue::from(json!({ "name": "One App" }))));
    let pwa = ConfigValue::from(json!({ "serviceWorker": "TRUE", "scope": "/" })).with("webManifest", factory);
    let config = ConfigValue::from(json!({
        "csp": "default-src 'self';",
        "eventLoopDelayThreshold": "250",
        "provideStateConfig": {
            "cdnUrl": { "server": "https://cdn.example.com/", "client": "https://cdn.example.com/" }
        },
        "appCompatibility": "^5.0.0"
    }))
    .with("pwa", pwa);

    let once = validate_root_module_app_config(&config, &root_context()).unwrap();
    let twice = validate_root_module_app_config(&once, &root_context()).unwrap();
    assert_eq!(once, twice);
    assert_ne!(once, config);
}

#[test]
fn test_nan_is_not_a_number() {
    let config = ConfigValue::from(json!({ "csp": "default-src 'self';" }))
        .with("eventLoopDelayThreshold", f64::NAN);

    let err = validate_root_module_app_config(&config, &root_context()).unwrap_err();
    assert_eq!(err.to_string(), r#""eventLoopDelayThreshold" must be a number"#);
}
