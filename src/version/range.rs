//! npm-style version ranges evaluated with the `semver` crate.

use semver::{Version, VersionReq};
use std::fmt;
use std::str::FromStr;

use super::{parse_version, strip_version_prefix};
use crate::core::ModcfgError;

/// Operators recognised at the start of a comparator, longest first.
const OPERATORS: &[&str] = &[">=", "<=", "~>", ">", "<", "=", "^", "~"];

/// A version range written in npm syntax.
///
/// | Syntax | Meaning |
/// |--------|---------|
/// | `1.2.3` | exactly 1.2.3 |
/// | `1.2` / `1.2.x` | `>=1.2.0 <1.3.0` |
/// | `*` / `x` / empty | any version |
/// | `^1.2.3`, `~1.2.3`, `>=1.0.0` | as in `semver` |
/// | `>=1.0.0 <2.0.0` | both comparators must hold |
/// | `1.0.0 - 2.3` | `>=1.0.0 <=2.3` |
/// | `^1.0.0 \|\| ^2.0.0` | either alternative |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl VersionRange {
    /// Parse an npm-style range.
    ///
    /// # Errors
    ///
    /// Returns [`ModcfgError::InvalidVersionRange`] when any comparator set
    /// cannot be translated or parsed.
    pub fn parse(input: &str) -> Result<Self, ModcfgError> {
        let raw = input.trim();
        let invalid = |reason: String| ModcfgError::InvalidVersionRange {
            range: input.to_string(),
            reason,
        };

        let mut alternatives = Vec::new();
        for set in raw.split("||") {
            let translated = translate_set(set.trim()).map_err(invalid)?;
            let req = VersionReq::parse(&translated).map_err(|e| invalid(e.to_string()))?;
            alternatives.push(req);
        }

        Ok(Self {
            raw: raw.to_string(),
            alternatives,
        })
    }

    /// Whether `version` falls inside any alternative of this range.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// Like [`matches`](Self::matches), for an unparsed version string.
    /// Unparseable versions never match.
    pub fn matches_str(&self, version: &str) -> bool {
        parse_version(version).is_ok_and(|v| self.matches(&v))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for VersionRange {
    type Err = ModcfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Translate one space-separated comparator set into `semver` syntax.
fn translate_set(set: &str) -> Result<String, String> {
    let tokens = tokenize(set);

    if let Some(pos) = tokens.iter().position(|t| t == "-") {
        if tokens.len() != 3 || pos != 1 {
            return Err(format!("malformed hyphen range '{set}'"));
        }
        let lower = partial(strip_version_prefix(&tokens[0]));
        let upper = partial(strip_version_prefix(&tokens[2]));
        let mut comparators = Vec::new();
        if let Some(lower) = lower {
            comparators.push(format!(">={lower}"));
        }
        if let Some(upper) = upper {
            comparators.push(format!("<={upper}"));
        }
        return Ok(join_or_any(comparators));
    }

    let mut comparators = Vec::new();
    for token in &tokens {
        if let Some(comparator) = translate_comparator(token)? {
            comparators.push(comparator);
        }
    }
    Ok(join_or_any(comparators))
}

/// Split on whitespace, gluing a lone operator to the version after it
/// (`>= 1.0.0` is the same as `>=1.0.0`).
fn tokenize(set: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_operator: Option<String> = None;
    for word in set.split_whitespace() {
        if word.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~')) {
            pending_operator = Some(pending_operator.unwrap_or_default() + word);
            continue;
        }
        match pending_operator.take() {
            Some(op) => tokens.push(op + word),
            None => tokens.push(word.to_string()),
        }
    }
    if let Some(op) = pending_operator {
        tokens.push(op);
    }
    tokens
}

/// Translate a single comparator. `None` means "matches everything".
fn translate_comparator(token: &str) -> Result<Option<String>, String> {
    let op = OPERATORS.iter().find(|op| token.starts_with(**op)).copied().unwrap_or("");
    let version = strip_version_prefix(token[op.len()..].trim());
    if version.is_empty() {
        return Err(format!("comparator '{token}' has no version"));
    }

    let Some(version) = partial(version) else {
        // `*`, `x`, `>=*` and friends
        return Ok(None);
    };

    let op = match op {
        "" => "=",
        "~>" => "~",
        other => other,
    };
    Ok(Some(format!("{op}{version}")))
}

/// Drop trailing wildcard components (`1.2.x` -> `1.2`); `None` when the
/// whole version is a wildcard.
fn partial(version: &str) -> Option<String> {
    let kept: Vec<&str> = version
        .split('.')
        .take_while(|part| !matches!(*part, "x" | "X" | "*"))
        .collect();
    if kept.is_empty() { None } else { Some(kept.join(".")) }
}

fn join_or_any(comparators: Vec<String>) -> String {
    if comparators.is_empty() { "*".to_string() } else { comparators.join(", ") }
}
