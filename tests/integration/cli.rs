//! End-to-end tests for the `modcfg validate` command.

use assert_cmd::Command;
use modcfg::test_utils::{HostConfigFixture, ModuleFixture, WebManifestFixture};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// `modcfg` running in `dir`, isolated from the caller's environment.
fn modcfg(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modcfg").unwrap();
    cmd.current_dir(dir)
        .env_remove("MODCFG_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_valid_root_module() {
    let temp = TempDir::new().unwrap();
    HostConfigFixture::basic().write_to(temp.path()).unwrap();
    ModuleFixture::root().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .args(["validate", "some-root.json", "--kind", "root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Valid root module config: some-root@1.2.3"));
}

#[test]
fn test_invalid_root_module() {
    let temp = TempDir::new().unwrap();
    HostConfigFixture::basic().write_to(temp.path()).unwrap();
    ModuleFixture::invalid_root().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .args(["validate", "some-root.json", "--kind", "root"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            r#"✗ "csp" must provide a valid content security policy in the Root module"#,
        ))
        .stdout(predicate::str::contains(
            r#"it requires "^4.0.0""#,
        ))
        .stderr(predicate::str::contains("Validation failed: 3 violation(s) in some-root@1.2.3"));
}

#[test]
fn test_child_module_against_host_root() {
    let temp = TempDir::new().unwrap();
    ModuleFixture::root().write_to(temp.path()).unwrap();
    HostConfigFixture::with_root_module("some-root.json").write_to(temp.path()).unwrap();
    ModuleFixture::child().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .args(["validate", "child-module.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Valid child module config: child-module@1.2.3"));
}

#[test]
fn test_child_module_incompatible_external_json() {
    let temp = TempDir::new().unwrap();
    let root = ModuleFixture::root().write_to(temp.path()).unwrap();
    let child = ModuleFixture::child_with_incompatible_external().write_to(temp.path()).unwrap();

    let output = modcfg(temp.path())
        .arg("validate")
        .arg(&child)
        .arg("--root")
        .arg(&root)
        .args(["--app-version", "5.0.0", "--format", "json"])
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let results: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(results["valid"], false);
    assert_eq!(results["kind"], "child");
    assert_eq!(results["module"], "child-module@1.2.3");
    assert_eq!(
        results["errors"][0],
        "some-library@3.2.1 is required by child-module, but the root module provides 9.8.7"
    );
}

#[test]
fn test_strict_mode_fails_on_warnings() {
    let temp = TempDir::new().unwrap();
    HostConfigFixture::basic().write_to(temp.path()).unwrap();
    ModuleFixture::child_providing_externals().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .args(["validate", "child-module.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "⚠ Warning: Module child-module attempted to provide externals.",
        ));

    modcfg(temp.path())
        .args(["validate", "child-module.json", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Strict mode validation failed"));
}

#[test]
fn test_quiet_suppresses_text_output() {
    let temp = TempDir::new().unwrap();
    let manifest = WebManifestFixture::valid().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .arg("--quiet")
        .arg("validate")
        .arg(&manifest)
        .args(["--kind", "manifest"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_invalid_manifest() {
    let temp = TempDir::new().unwrap();
    WebManifestFixture::invalid().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .args(["validate", "manifest.webmanifest", "--kind", "manifest"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#"✗ "name" is required"#))
        .stdout(predicate::str::contains(r#"✗ "my_name" is not allowed"#));
}

#[test]
fn test_missing_app_version() {
    let temp = TempDir::new().unwrap();
    ModuleFixture::child().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .args(["validate", "child-module.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No app version configured"));
}

#[test]
fn test_explicit_config_must_exist() {
    let temp = TempDir::new().unwrap();
    ModuleFixture::child().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .args(["--config", "missing.toml", "validate", "child-module.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("modcfg.toml"));
}

#[test]
fn test_config_from_environment() {
    let temp = TempDir::new().unwrap();
    let ci = temp.path().join("ci");
    std::fs::create_dir_all(&ci).unwrap();
    let host = HostConfigFixture::basic().write_to(&ci).unwrap();
    ModuleFixture::root().write_to(temp.path()).unwrap();

    modcfg(temp.path())
        .env("MODCFG_CONFIG", &host)
        .args(["validate", "some-root.json", "--kind", "root"])
        .assert()
        .success();
}
