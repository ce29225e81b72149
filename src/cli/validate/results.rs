//! Validation results structure for JSON output.

use serde::Serialize;

use super::command::ConfigKind;
use crate::validation::ValidationOutcome;

/// Results of validating one file.
///
/// # JSON Output Example
///
/// ```json
/// {
///   "valid": false,
///   "kind": "child",
///   "module": "child-module@1.2.3",
///   "errors": [
///     "some-library@3.2.1 is required by child-module, but the root module provides 9.8.7"
///   ],
///   "warnings": []
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ValidationResults {
    /// Overall validation status - true if no errors (and no warnings in strict mode)
    pub valid: bool,
    /// What was validated
    pub kind: ConfigKind,
    /// `name@version` of the module, or the manifest file name
    pub module: String,
    /// Violated rules, in declaration order
    pub errors: Vec<String>,
    /// Non-fatal advisories
    pub warnings: Vec<String>,
}

impl ValidationResults {
    pub fn from_outcome(kind: ConfigKind, module: impl Into<String>, outcome: &ValidationOutcome) -> Self {
        Self {
            valid: outcome.is_valid(),
            kind,
            module: module.into(),
            errors: outcome.error_messages(),
            warnings: outcome.warning_messages(),
        }
    }

    /// Fold warnings into errors.
    pub fn apply_strict(&mut self) {
        if !self.warnings.is_empty() {
            self.errors.append(&mut self.warnings);
            self.valid = false;
        }
    }
}
