//! Core error types for modcfg
//!
//! - [`ModcfgError`] - enumerated failures of the engine, the host config loader and the CLI
//! - [`ErrorContext`] - user-friendly wrapper with details and suggestions
//! - [`user_friendly_error`] - convert any error chain into an [`ErrorContext`]

pub mod error;

pub use error::{ErrorContext, ModcfgError, create_error_context, user_friendly_error};
