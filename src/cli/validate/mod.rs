//! Validate module configurations and web app manifests from the command line.
//!
//! The engine in [`crate::app_config`] validates values handed to it by a
//! module loader. This command plays the loader's part for files on disk:
//! it reads a module file, assembles the [`ValidationContext`] from flags and
//! `modcfg.toml`, runs the matching validator and reports the result.
//!
//! [`ValidationContext`]: crate::validation::ValidationContext
//!
//! # Examples
//!
//! Validate a root module:
//! ```bash
//! modcfg validate modules/root.json --kind root --app-version 5.0.0
//! ```
//!
//! Validate a child module against the root module it will load into:
//! ```bash
//! modcfg validate modules/child.json --root modules/root.json
//! ```
//!
//! Validate a web app manifest:
//! ```bash
//! modcfg validate manifest.webmanifest --kind manifest
//! ```
//!
//! Strict mode with JSON output for CI:
//! ```bash
//! modcfg validate modules/child.json --strict --format json
//! ```
//!
//! # Output Formats
//!
//! ## Text Format (Default)
//! ```text
//! ✗ Invalid child module config: child-module@1.2.3
//! ✗ some-library@3.2.1 is required by child-module, but the root module provides 9.8.7
//! ```
//!
//! ## JSON Format
//! ```json
//! {
//!   "valid": true,
//!   "kind": "child",
//!   "module": "child-module@1.2.3",
//!   "errors": [],
//!   "warnings": ["Module child-module attempted to provide externals. Only the root module can provide externals."]
//! }
//! ```
//!
//! # Limitations
//!
//! JSON cannot express functions or regular expressions, so fields that
//! must hold one (`configureRequestLog`, `createSsrFetch`, state config
//! validators, regex CORS origins) are reported as having the wrong type
//! when they appear in a module file.

mod command;
mod executor;
mod module_file;
mod results;

#[cfg(test)]
mod tests;

// Re-export public API
pub use command::{ConfigKind, OutputFormat, ValidateCommand};
pub use module_file::{ModuleFile, load_document};
pub use results::ValidationResults;
