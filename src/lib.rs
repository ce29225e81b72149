//! modcfg - module configuration validation
//!
//! A validation engine for the configuration that modules hand to a modular
//! application host. One *root* module owns process-wide settings (content
//! security policy, CORS origins, PWA settings, shared externals and state);
//! any number of *child* modules plug into it and declare what they need
//! from it.
//!
//! modcfg checks both the shape of each configuration and the consistency
//! between modules: required externals must be provided by the root in a
//! compatible version, and every module's `appCompatibility` range must
//! admit the host's version. Every rule runs; the caller gets either the
//! validated configuration or one error listing every violation, joined
//! with `". "` in the order the rules are declared.
//!
//! # Core Modules
//!
//! - [`app_config`] - entry points for root, child and web manifest validation
//! - [`validation`] - field paths, violation reports and the validation context
//! - [`schema`] - schema primitives and the shapes built from them
//! - [`externals`] - provided and required external dependencies
//! - [`value`] - the untyped configuration value model
//! - [`version`] - npm-style version ranges on top of `semver`
//!
//! ## Supporting Modules
//!
//! - [`cli`] - the `modcfg` command line
//! - [`config`] - host configuration (`modcfg.toml`)
//! - [`core`] - error types and user-facing error formatting
//! - [`constants`] - shared names and defaults
//!
//! # Example
//!
//! ```rust
//! use modcfg::app_config::validate_root_module_app_config;
//! use modcfg::validation::ValidationContext;
//! use modcfg::value::ConfigValue;
//! use serde_json::json;
//!
//! let context = ValidationContext::new("some-root", "1.2.3", "5.0.0");
//! let config = ConfigValue::from(json!({
//!     "csp": "default-src 'self';",
//!     "pwa": { "scope": "\\", "serviceWorker": true },
//!     "appCompatibility": "1.0.0",
//! }));
//!
//! let err = validate_root_module_app_config(&config, &context).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     concat!(
//!         r#""pwa.scope" with value "\" fails to match the required pattern: /^\//. "#,
//!         r#"some-root@1.2.3 is not compatible with this version of one-app (5.0.0), it requires "1.0.0""#,
//!     )
//! );
//! ```

pub mod app_config;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod externals;
pub mod schema;
pub mod validation;
pub mod value;
pub mod version;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
