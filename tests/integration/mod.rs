//! Integration test suite for modcfg
//!
//! Exercises the public validation API and the `modcfg` binary end to end.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **root_config**: Root module `appConfig` validation
//! - **child_config**: Child module `appConfig` validation against provided externals
//! - **web_manifest**: Web app manifest validation
//! - **module_load**: Root-then-child flow as a module loader drives it
//! - **cli**: The `modcfg validate` command

mod child_config;
mod cli;
mod module_load;
mod root_config;
mod web_manifest;
