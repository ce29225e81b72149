//! Error handling for modcfg
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`ModcfgError`]) for callers embedding the engine
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! Rejected module configuration is reported through
//! [`ValidationError`](crate::validation::ValidationError), which carries every
//! violated rule. [`ModcfgError::Validation`] wraps it when a validation
//! failure travels alongside other failures (host config loading, file I/O).
//!
//! # Examples
//!
//! ```rust,no_run
//! use modcfg::core::{ErrorContext, ModcfgError, user_friendly_error};
//!
//! let error = ModcfgError::HostConfigNotFound;
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::validation::ValidationError;

/// The main error type for modcfg operations.
#[derive(Error, Debug, Clone)]
pub enum ModcfgError {
    /// One or more configuration rules were violated.
    ///
    /// The message is every violation joined with `". "`.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A string that should be an exact semantic version is not one.
    #[error("Invalid semantic version '{version}': {reason}")]
    InvalidVersion {
        /// The offending input
        version: String,
        /// Parser explanation
        reason: String,
    },

    /// A string that should be a semantic version range is not one.
    #[error("Invalid semantic version range '{range}': {reason}")]
    InvalidVersionRange {
        /// The offending input
        range: String,
        /// Parser explanation
        reason: String,
    },

    /// A child module's state config validator rejected the host's shared state.
    ///
    /// Raised by
    /// [`apply_state_config_validators`](crate::app_config::apply_state_config_validators)
    /// after the module configuration itself validated.
    #[error("Module {module} rejected {side} state config '{key}': {reason}")]
    StateConfigRejected {
        /// Module whose validator rejected the value
        module: String,
        /// State config key being validated
        key: String,
        /// `client` or `server`
        side: String,
        /// Reason returned by the validator
        reason: String,
    },

    /// No `modcfg.toml` was found.
    #[error("No modcfg.toml found in current directory or any parent directory")]
    HostConfigNotFound,

    /// `modcfg.toml` exists but cannot be understood.
    #[error("Invalid host configuration in {file}: {reason}")]
    HostConfigError {
        /// Path to the host configuration file
        file: String,
        /// What is wrong with it
        reason: String,
    },

    /// The app version needed for compatibility checks is unknown.
    #[error("No app version configured")]
    MissingAppVersion,

    /// A module or manifest file could not be parsed.
    #[error("Failed to parse {file}: {reason}")]
    ModuleParseError {
        /// Path to the module file
        file: String,
        /// Parser explanation
        reason: String,
    },

    /// Catch-all with a free-form message.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// A [`ModcfgError`] enriched with details and a suggestion for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ModcfgError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: ModcfgError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error. Displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error. Displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Walks the error chain looking for a [`ModcfgError`] or a
/// [`ValidationError`]; anything else is reported as-is with the chain
/// flattened into the details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(modcfg_error) = cause.downcast_ref::<ModcfgError>() {
            return create_error_context(modcfg_error);
        }
        if let Some(validation_error) = cause.downcast_ref::<ValidationError>() {
            return create_error_context(&ModcfgError::Validation(validation_error.clone()));
        }
    }

    let details: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(ModcfgError::Other {
        message: error.to_string(),
    });
    if details.is_empty() { context } else { context.with_details(details.join(": ")) }
}

/// Attach tailored details and suggestions to a known error.
pub fn create_error_context(error: &ModcfgError) -> ErrorContext {
    let context = ErrorContext::new(error.clone());
    match error {
        ModcfgError::Validation(validation) => context
            .with_details(format!("{} rule(s) violated", validation.violations().len()))
            .with_suggestion("Fix the listed fields in the module's appConfig and validate again"),
        ModcfgError::InvalidVersion { .. } => context
            .with_suggestion("Use an exact semantic version such as '1.2.3'"),
        ModcfgError::InvalidVersionRange { .. } => context
            .with_suggestion("Use an npm-style range such as '^1.2.0' or '>=1.0.0 <2.0.0'"),
        ModcfgError::StateConfigRejected { key, .. } => context.with_suggestion(format!(
            "Check the value the root module provides for '{key}' in provideStateConfig"
        )),
        ModcfgError::HostConfigNotFound => context
            .with_suggestion("Create a modcfg.toml or pass --config <path>")
            .with_details("modcfg searches for modcfg.toml in the current directory and parent directories"),
        ModcfgError::HostConfigError { .. } => context
            .with_suggestion("Check the TOML syntax and field names in modcfg.toml"),
        ModcfgError::MissingAppVersion => context
            .with_suggestion("Pass --app-version or set app_version in modcfg.toml"),
        ModcfgError::ModuleParseError { .. } => context
            .with_suggestion("Module files must be JSON objects with \"name\", \"version\" and \"appConfig\" keys"),
        ModcfgError::Other { .. } => context,
    }
}
