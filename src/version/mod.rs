//! Semantic version handling for externals and app compatibility.
//!
//! Module authors write versions and ranges the way npm does: a bare
//! `1.2.3` range means *exactly* 1.2.3, comparators are separated by spaces,
//! `||` separates alternatives and `1.0.0 - 2.0.0` is an inclusive hyphen
//! range. The `semver` crate speaks Cargo's dialect (bare versions are caret
//! requirements, comparators are comma separated), so [`VersionRange`]
//! translates the npm form into a set of [`semver::VersionReq`] alternatives
//! and leaves the actual matching to `semver`.
//!
//! # Examples
//!
//! ```rust
//! use modcfg::version::{VersionRange, satisfies};
//!
//! let range = VersionRange::parse(">=1.0.0 <2.0.0 || 3.x")?;
//! assert!(range.matches_str("1.4.0"));
//! assert!(range.matches_str("3.1.0"));
//! assert!(!range.matches_str("2.0.0"));
//!
//! // Bare versions are exact, unlike Cargo requirements
//! assert!(satisfies("9.8.7", "9.8.7"));
//! assert!(!satisfies("9.9.0", "9.8.7"));
//! # Ok::<(), modcfg::core::ModcfgError>(())
//! ```

mod range;

pub use range::VersionRange;

use semver::Version;

use crate::core::ModcfgError;

/// Parse an exact version, tolerating a leading `v` or `=` and surrounding
/// whitespace (`" v1.2.3 "` is `1.2.3`).
///
/// # Errors
///
/// Returns [`ModcfgError::InvalidVersion`] when the input is not a semantic
/// version.
pub fn parse_version(input: &str) -> Result<Version, ModcfgError> {
    let cleaned = strip_version_prefix(input.trim());
    Version::parse(cleaned).map_err(|e| ModcfgError::InvalidVersion {
        version: input.to_string(),
        reason: e.to_string(),
    })
}

/// Whether `version` satisfies the npm-style `range`.
///
/// Invalid versions and invalid ranges never satisfy anything.
pub fn satisfies(version: &str, range: &str) -> bool {
    match (parse_version(version), VersionRange::parse(range)) {
        (Ok(version), Ok(range)) => range.matches(&version),
        _ => false,
    }
}

pub(crate) fn strip_version_prefix(input: &str) -> &str {
    let input = input.strip_prefix('=').unwrap_or(input).trim_start();
    input.strip_prefix('v').or_else(|| input.strip_prefix('V')).unwrap_or(input)
}
