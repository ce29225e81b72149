use modcfg::app_config::validate_web_app_manifest;
use modcfg::test_utils::WebManifestFixture;
use modcfg::value::ConfigValue;
use serde_json::json;

#[test]
fn test_valid_web_manifest() {
    let manifest = ConfigValue::from(json!({
        "lang": "en-US",
        "dir": "auto",
        "display": "standalone",
        "orientation": "portrait",
        "short_name": "Test",
        "name": "One App Test",
        "categories": ["testing", "example"],
        "icons": [{
            "src": "https://example.com/pwa-icon.png",
            "type": "img/png",
            "sizes": "72x72",
            "purpose": "badge"
        }],
        "screenshots": [{
            "src": "https://example.com/pwa-screenshot.png",
            "type": "img/png",
            "sizes": "1024x768"
        }],
        "related_applications": [{
            "platform": "new pwa store",
            "url": "https://platform.example.com/pwa",
            "id": "aiojfoahfaf"
        }]
    }));

    assert_eq!(validate_web_app_manifest(&manifest), Ok(manifest.clone()));
}

#[test]
fn test_fixture_manifest_is_valid() {
    let manifest = ConfigValue::from(WebManifestFixture::valid().content);
    assert!(validate_web_app_manifest(&manifest).is_ok());
}

#[test]
fn test_invalid_web_manifest() {
    let manifest = ConfigValue::from(json!({
        "my_name": "One App Test",
        "display": "big",
        "orientation": "up",
        "dir": "backwards",
        "direction": "backwards",
        "icons": [{ "size": "72x72" }, { "purpose": "none" }],
        "screenshots": [{ "href": "https://screenshots.example.com/screenshot/latest" }],
        "related_applications": [{ "store": "new pwa store" }]
    }));

    let err = validate_web_app_manifest(&manifest).unwrap_err();
    let expected = [
        r#""name" is required"#,
        r#""related_applications[0].store" is not allowed"#,
        r#""orientation" must be one of [any, natural, landscape, landscape-primary, landscape-secondary, portrait, portrait-primary, portrait-secondary]"#,
        r#""display" must be one of [fullscreen, standalone, minimal-ui, browser]"#,
        r#""dir" must be one of [auto, ltr, rtl]"#,
        r#""icons[0].size" is not allowed"#,
        r#""icons[1].purpose" must be one of [any, maskable, badge]"#,
        r#""screenshots[0].href" is not allowed"#,
        r#""my_name" is not allowed"#,
        r#""direction" is not allowed"#,
    ];
    assert_eq!(err.to_string(), expected.join(". "));
}

#[test]
fn test_manifest_must_be_an_object() {
    let err = validate_web_app_manifest(&ConfigValue::from("One App")).unwrap_err();
    assert_eq!(err.to_string(), r#""value" must be of type object"#);
}
