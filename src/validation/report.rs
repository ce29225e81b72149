//! Violation collection and the aggregated validation failure.
//!
//! Every rule of a schema runs; nothing short-circuits. Rules push what they
//! find into a [`Report`] in the order they are evaluated (declared field
//! order, then nested field order, then array index order), so the rendered
//! message is stable for a given input and tests can assert on it verbatim.
//!
//! Warnings ride along in the same report but never fail a validation. They
//! are logged through `tracing` when the report is turned into a result.

use std::fmt;

use thiserror::Error;

use super::path::FieldPath;
use crate::value::ConfigValue;

/// Separator placed between violation messages in the rendered failure.
pub const MESSAGE_SEPARATOR: &str = ". ";

/// Category of a violated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Wrong type, missing required field, pattern or enum mismatch, unknown key.
    Shape,
    /// Rule that depends on the validation context: missing or incompatible
    /// externals, unsatisfied app compatibility.
    CrossReference,
}

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: FieldPath,
    pub kind: ViolationKind,
    /// Fully rendered message segment, e.g. `"csp" must be a string`.
    pub message: String,
}

/// A non-fatal advisory raised during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub path: FieldPath,
    pub message: String,
}

/// Accumulates violations and warnings for one validation call.
#[derive(Debug, Default)]
pub struct Report {
    violations: Vec<Violation>,
    warnings: Vec<Warning>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a shape violation rendered as `"<path>" <rule>`.
    pub fn shape(&mut self, path: &FieldPath, rule: impl fmt::Display) {
        self.push(path, ViolationKind::Shape, format!("\"{path}\" {rule}"));
    }

    /// Record a shape violation whose message is already fully rendered.
    pub fn shape_message(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.push(path, ViolationKind::Shape, message.into());
    }

    /// Record a cross-reference violation with a fully rendered message.
    pub fn cross_reference(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.push(path, ViolationKind::CrossReference, message.into());
    }

    /// Record a warning.
    pub fn warn(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.warnings.push(Warning {
            path: path.clone(),
            message: message.into(),
        });
    }

    /// Append everything another report collected, keeping its order.
    pub fn merge(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.warnings.extend(other.warnings);
    }

    fn push(&mut self, path: &FieldPath, kind: ViolationKind, message: String) {
        self.violations.push(Violation {
            path: path.clone(),
            kind,
            message,
        });
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Number of violations recorded so far.
    ///
    /// Composite rules compare counts before and after checking a member to
    /// decide whether the member passed.
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Close the report without logging anything.
    pub fn outcome(self, value: ConfigValue) -> ValidationOutcome {
        ValidationOutcome {
            value,
            violations: self.violations,
            warnings: self.warnings,
        }
    }

    /// Close the report, logging warnings and failing on any violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] holding every recorded violation.
    pub fn into_result(self, value: ConfigValue) -> Result<ConfigValue, ValidationError> {
        self.outcome(value).into_result()
    }
}

/// Everything one validation call found, before it is turned into a result.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// The validated value, with declared conversions applied.
    pub value: ConfigValue,
    pub violations: Vec<Violation>,
    pub warnings: Vec<Warning>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Rendered violation messages in evaluation order.
    pub fn error_messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.message.clone()).collect()
    }

    /// Log warnings and return the value, or fail with every violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when at least one violation was recorded.
    pub fn into_result(self) -> Result<ConfigValue, ValidationError> {
        if !self.violations.is_empty() {
            tracing::debug!("validation failed with {} violation(s)", self.violations.len());
            return Err(ValidationError {
                violations: self.violations,
            });
        }
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }
        Ok(self.value)
    }
}

/// The single aggregated failure returned by a rejected validation.
///
/// Its message is every violation message joined with `". "`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages().enumerate() {
            if i > 0 {
                f.write_str(MESSAGE_SEPARATOR)?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}
