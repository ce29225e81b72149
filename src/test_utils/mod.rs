//! Test utilities for modcfg
//!
//! Shared contexts and on-disk fixtures used by the unit tests and the
//! integration tests (with the `test-utils` feature).
//!
//! # Example
//!
//! ```rust,no_run
//! use modcfg::app_config::validate_child_module_app_config;
//! use modcfg::test_utils::child_context;
//! use modcfg::value::ConfigValue;
//! use serde_json::json;
//!
//! let config = ConfigValue::from(json!({
//!     "requiredExternals": { "some-library": "^9.0.0" }
//! }));
//! assert!(validate_child_module_app_config(&config, &child_context()).is_ok());
//! ```

pub mod fixtures;

pub use fixtures::{HostConfigFixture, ModuleFixture, WebManifestFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::validation::{ProvidedExternals, ValidationContext};
use crate::value::{ConfigMap, ConfigValue};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Host version used by every shared context.
pub const TEST_APP_VERSION: &str = "5.0.0";

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG` when set; with neither, no subscriber is installed.
///
/// ```bash
/// RUST_LOG=modcfg=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// `{ cdnUrl: "https://cdn.example.com/" }`
pub fn test_state_config() -> ConfigMap {
    let mut state = ConfigMap::new();
    state.insert("cdnUrl".to_string(), ConfigValue::from("https://cdn.example.com/"));
    state
}

/// `some-library@9.8.7`, provided as an empty module object.
pub fn test_provided_externals() -> ProvidedExternals {
    let mut externals = ProvidedExternals::new();
    externals.insert("some-library", "9.8.7", ConfigValue::object::<&str, ConfigValue, _>([]));
    externals
}

/// Context for `some-root@1.2.3` loading into app version 5.0.0.
pub fn root_context() -> ValidationContext {
    ValidationContext::new("some-root", "1.2.3", TEST_APP_VERSION)
        .with_server_state_config(test_state_config())
        .with_client_state_config(test_state_config())
}

/// Context for `child-module@1.2.3` with the root providing `some-library@9.8.7`.
pub fn child_context() -> ValidationContext {
    root_context()
        .for_module("child-module", "1.2.3")
        .with_provided_externals(test_provided_externals())
}
