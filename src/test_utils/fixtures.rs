//! Test fixtures for module files, host configs and web app manifests
//!
//! Each fixture holds file content and writes it into a directory, so CLI
//! tests can point `modcfg validate` at real files.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// A module file (`{ name, version, appConfig }`).
#[derive(Clone, Debug)]
pub struct ModuleFixture {
    pub file_name: String,
    pub content: Value,
}

impl ModuleFixture {
    /// Module file with the given identity and `appConfig`.
    pub fn new(name: &str, version: &str, app_config: Value) -> Self {
        Self {
            file_name: format!("{name}.json"),
            content: json!({ "name": name, "version": version, "appConfig": app_config }),
        }
    }

    /// Root module providing `some-library@9.8.7`, compatible with app 5.0.0.
    pub fn root() -> Self {
        Self::new(
            "some-root",
            "1.2.3",
            json!({
                "csp": "default-src 'self';",
                "corsOrigins": ["example.com"],
                "providedExternals": {
                    "some-library": { "version": "9.8.7", "module": {} }
                },
                "provideStateConfig": {
                    "cdnUrl": {
                        "server": "https://cdn.example.com/",
                        "client": "https://cdn.example.com/"
                    }
                },
                "pwa": { "serviceWorker": true, "scope": "/" },
                "appCompatibility": "^5.0.0"
            }),
        )
    }

    /// Root module missing `csp` and requiring an app version it cannot get.
    pub fn invalid_root() -> Self {
        Self::new(
            "some-root",
            "1.2.3",
            json!({ "pwa": { "scope": "\\" }, "appCompatibility": "^4.0.0" }),
        )
    }

    /// Child module requiring `some-library`, satisfied by [`ModuleFixture::root`].
    pub fn child() -> Self {
        Self::new(
            "child-module",
            "1.2.3",
            json!({
                "requiredExternals": { "some-library": "^9.0.0" },
                "appCompatibility": ">=5.0.0"
            }),
        )
    }

    /// Child module requiring a version of `some-library` the root does not provide.
    pub fn child_with_incompatible_external() -> Self {
        Self::new(
            "child-module",
            "1.2.3",
            json!({ "requiredExternals": { "some-library": "3.2.1" } }),
        )
    }

    /// Child module that tries to provide externals, which only warns.
    pub fn child_providing_externals() -> Self {
        Self::new(
            "child-module",
            "1.2.3",
            json!({
                "providedExternals": {
                    "other-library": { "version": "1.0.0", "module": {} }
                }
            }),
        )
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        let content = serde_json::to_string_pretty(&self.content)?;
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// A `modcfg.toml` host config.
#[derive(Clone, Debug)]
pub struct HostConfigFixture {
    pub content: String,
}

impl HostConfigFixture {
    /// App version 5.0.0 with `cdnUrl` in both state configs.
    pub fn basic() -> Self {
        Self {
            content: r#"
app_version = "5.0.0"

[server_state_config]
cdnUrl = "https://cdn.example.com/"

[client_state_config]
cdnUrl = "https://cdn.example.com/"
"#
            .trim()
            .to_string(),
        }
    }

    /// [`HostConfigFixture::basic`] plus a `root_module` entry.
    pub fn with_root_module(root_module: &str) -> Self {
        let mut fixture = Self::basic();
        fixture.content = format!("root_module = \"{root_module}\"\n{}", fixture.content);
        fixture
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(crate::constants::HOST_CONFIG_FILE_NAME);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// A web app manifest document.
#[derive(Clone, Debug)]
pub struct WebManifestFixture {
    pub content: Value,
}

impl WebManifestFixture {
    /// Manifest using every supported field.
    pub fn valid() -> Self {
        Self {
            content: json!({
                "name": "My Progressive Web App",
                "short_name": "My PWA",
                "lang": "en-US",
                "scope": "/",
                "start_url": "/",
                "theme_color": "#000000",
                "background_color": "#ffffff",
                "categories": ["entertainment"],
                "prefer_related_applications": false,
                "related_applications": [{
                    "platform": "play",
                    "url": "https://play.google.com/store/apps/details?id=com.example.app1",
                    "id": "com.example.app1"
                }],
                "orientation": "portrait",
                "display": "standalone",
                "dir": "auto",
                "icons": [{
                    "src": "https://example.com/pwa-icon.png",
                    "type": "img/png",
                    "sizes": "192x192",
                    "purpose": "any"
                }],
                "screenshots": [{
                    "src": "https://example.com/pwa-screenshot.png",
                    "type": "img/png",
                    "sizes": "540x720"
                }]
            }),
        }
    }

    /// Manifest without a `name` and with an unknown key.
    pub fn invalid() -> Self {
        Self {
            content: json!({ "short_name": "My PWA", "my_name": "unknown" }),
        }
    }

    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("manifest.webmanifest");
        let content = serde_json::to_string_pretty(&self.content)?;
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
