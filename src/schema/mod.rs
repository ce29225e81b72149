//! Schema primitives and the reusable shapes built from them.
//!
//! Every primitive has the same contract: it takes the value, the path it
//! lives at and the [`Report`] of the current validation call, records what
//! is wrong, and returns the validated value (with any declared conversion
//! applied). Primitives never fail on their own; the entry points in
//! [`crate::app_config`] decide what a non-empty report means.
//!
//! Objects are walked with [`Fields`], which visits declared keys in the
//! order the schema declares them and then reports unknown keys in the order
//! the author wrote them. That ordering is what makes aggregated messages
//! stable enough to assert on verbatim.
//!
//! # Shapes
//!
//! - [`manifest`] - web app manifest
//! - [`pwa`] - progressive web app settings
//! - [`safe_request`] - header/cookie allow-lists
//! - [`state_config`] - provided state values and child state validators

pub mod formats;
pub mod manifest;
pub mod pwa;
pub mod safe_request;
pub mod state_config;

use crate::validation::{FieldPath, Report};
use crate::value::{ConfigMap, ConfigValue};

/// Walks an object's keys in declared order.
pub struct Fields<'a> {
    map: &'a ConfigMap,
    path: &'a FieldPath,
    declared: Vec<&'static str>,
    validated: ConfigMap,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a ConfigMap, path: &'a FieldPath) -> Self {
        Self {
            map,
            path,
            declared: Vec::new(),
            validated: ConfigMap::new(),
        }
    }

    /// Check `key` when present.
    pub fn optional<F>(&mut self, key: &'static str, report: &mut Report, check: F)
    where
        F: FnOnce(&ConfigValue, &FieldPath, &mut Report) -> ConfigValue,
    {
        self.declared.push(key);
        if let Some(value) = self.map.get(key) {
            let validated = check(value, &self.path.key(key), report);
            self.validated.insert(key.to_string(), validated);
        }
    }

    /// Check `key`, reporting `is required` when it is absent.
    pub fn required<F>(&mut self, key: &'static str, report: &mut Report, check: F)
    where
        F: FnOnce(&ConfigValue, &FieldPath, &mut Report) -> ConfigValue,
    {
        if !self.map.contains_key(key) {
            report.shape(&self.path.key(key), "is required");
        }
        self.optional(key, report, check);
    }

    /// Like [`required`](Self::required) with a custom message for the
    /// missing key.
    pub fn required_or<F>(
        &mut self,
        key: &'static str,
        missing: &str,
        report: &mut Report,
        check: F,
    ) where
        F: FnOnce(&ConfigValue, &FieldPath, &mut Report) -> ConfigValue,
    {
        if !self.map.contains_key(key) {
            report.shape_message(&self.path.key(key), missing);
        }
        self.optional(key, report, check);
    }

    /// Reject undeclared keys and rebuild the object in input order.
    pub fn finish(self, report: &mut Report) -> ConfigValue {
        let mut out = ConfigMap::with_capacity(self.map.len());
        for (key, value) in self.map {
            if !self.declared.contains(&key.as_str()) {
                report.shape(&self.path.key(key.as_str()), "is not allowed");
            }
            let value = self.validated.get(key).unwrap_or(value);
            out.insert(key.clone(), value.clone());
        }
        ConfigValue::Object(out)
    }
}

/// A closed object whose keys are walked by `keys`.
pub fn object<F>(value: &ConfigValue, path: &FieldPath, report: &mut Report, keys: F) -> ConfigValue
where
    F: FnOnce(&mut Fields<'_>, &mut Report),
{
    let Some(map) = value.as_object() else {
        report.shape(path, "must be of type object");
        return value.clone();
    };
    let mut fields = Fields::new(map, path);
    keys(&mut fields, report);
    fields.finish(report)
}

/// An open object whose every entry is checked by `entry`, in input order.
pub fn entries<F>(value: &ConfigValue, path: &FieldPath, report: &mut Report, mut entry: F) -> ConfigValue
where
    F: FnMut(&str, &ConfigValue, &FieldPath, &mut Report) -> ConfigValue,
{
    let Some(map) = value.as_object() else {
        report.shape(path, "must be of type object");
        return value.clone();
    };
    let out: ConfigMap = map
        .iter()
        .map(|(key, item)| (key.clone(), entry(key, item, &path.key(key.as_str()), report)))
        .collect();
    ConfigValue::Object(out)
}

/// A non-empty string.
pub fn string(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    match value {
        ConfigValue::String(s) if s.is_empty() => report.shape(path, "is not allowed to be empty"),
        ConfigValue::String(_) => {}
        _ => report.shape(path, "must be a string"),
    }
    value.clone()
}

/// A boolean. `"true"` and `"false"` strings convert, ignoring case.
pub fn boolean(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    match value {
        ConfigValue::Bool(_) => value.clone(),
        ConfigValue::String(s) if s.eq_ignore_ascii_case("true") => ConfigValue::Bool(true),
        ConfigValue::String(s) if s.eq_ignore_ascii_case("false") => ConfigValue::Bool(false),
        _ => {
            report.shape(path, "must be a boolean");
            value.clone()
        }
    }
}

/// A finite number; positive infinity too when `allow_infinity` is set.
/// Decimal numeric strings convert.
pub fn number(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    allow_infinity: bool,
) -> ConfigValue {
    let n = match value {
        ConfigValue::Number(n) => *n,
        ConfigValue::String(s) => match formats::parse_numeric(s) {
            Some(n) => n,
            None => {
                report.shape(path, "must be a number");
                return value.clone();
            }
        },
        _ => {
            report.shape(path, "must be a number");
            return value.clone();
        }
    };
    if n.is_nan() {
        report.shape(path, "must be a number");
        return value.clone();
    }
    let allowed = n.is_finite() || (allow_infinity && n == f64::INFINITY);
    if !allowed {
        report.shape(path, "cannot be infinity");
    }
    ConfigValue::Number(n)
}

/// A callable, optionally bounded in arity.
pub fn function(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    max_arity: Option<usize>,
) -> ConfigValue {
    match (value.as_callable(), max_arity) {
        (None, _) => report.shape(path, "must be of type function"),
        (Some(callable), Some(max)) if callable.arity() > max => {
            report.shape(path, format!("must have an arity lesser or equal to {max}"));
        }
        _ => {}
    }
    value.clone()
}

/// An array whose items are checked by `item`, in index order.
pub fn array<F>(value: &ConfigValue, path: &FieldPath, report: &mut Report, item: F) -> ConfigValue
where
    F: Fn(&ConfigValue, &FieldPath, &mut Report) -> ConfigValue,
{
    let Some(items) = value.as_array() else {
        report.shape(path, "must be an array");
        return value.clone();
    };
    ConfigValue::Array(
        items.iter().enumerate().map(|(i, v)| item(v, &path.index(i), report)).collect(),
    )
}

/// One of a fixed set of strings. Anything else, whatever its type, is
/// reported with the allowed set.
pub fn one_of(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    allowed: &[&str],
) -> ConfigValue {
    if !value.as_str().is_some_and(|s| allowed.contains(&s)) {
        report.shape(path, format!("must be one of [{}]", allowed.join(", ")));
    }
    value.clone()
}

/// A non-empty string accepted by `matches`; `pattern` is the form shown
/// to the author.
pub fn pattern(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    matches: fn(&str) -> bool,
    pattern: &str,
) -> ConfigValue {
    let before = report.violation_count();
    string(value, path, report);
    if report.violation_count() == before {
        if let Some(s) = value.as_str() {
            if !matches(s) {
                report.shape(
                    path,
                    format!("with value \"{s}\" fails to match the required pattern: /{pattern}/"),
                );
            }
        }
    }
    value.clone()
}

/// A non-empty string that is an absolute URI.
pub fn uri(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    let before = report.violation_count();
    string(value, path, report);
    if report.violation_count() == before && !value.as_str().is_some_and(formats::is_uri) {
        report.shape(path, "must be a valid uri");
    }
    value.clone()
}

/// A regular-expression object.
pub fn regex(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    if !matches!(value, ConfigValue::Regex(_)) {
        report.shape(path, "must be an instance of RegExp");
    }
    value.clone()
}

/// One branch of an [`alternatives`] rule.
pub struct Alternative<'a> {
    /// Type name listed when no branch accepts the value's type.
    pub label: &'static str,
    /// Whether the value has this branch's base type.
    pub accepts: fn(&ConfigValue) -> bool,
    /// Rules applied once the base type matched.
    pub check: &'a dyn Fn(&ConfigValue, &FieldPath, &mut Report) -> ConfigValue,
}

/// The value must satisfy at least one branch. Branches never convert.
///
/// When no branch accepts the value's type the message lists the branch
/// types. When exactly one branch accepted the type and failed on a single
/// rule, that rule's violation is reported as-is. Otherwise the value
/// "does not match any of the allowed types".
pub fn alternatives(
    value: &ConfigValue,
    path: &FieldPath,
    report: &mut Report,
    branches: &[Alternative<'_>],
) -> ConfigValue {
    let mut types: Vec<&str> = Vec::new();
    let mut attempts: Vec<Report> = Vec::new();
    for branch in branches {
        if !(branch.accepts)(value) {
            if !types.contains(&branch.label) {
                types.push(branch.label);
            }
            continue;
        }
        let mut attempt = Report::new();
        let validated = (branch.check)(value, path, &mut attempt);
        if !attempt.has_violations() {
            return validated;
        }
        attempts.push(attempt);
    }

    match attempts.len() {
        0 => report.shape(path, format!("must be one of [{}]", types.join(", "))),
        1 if attempts[0].violation_count() == 1 => {
            if let Some(attempt) = attempts.pop() {
                report.merge(attempt);
            }
        }
        _ => report.shape(path, "does not match any of the allowed types"),
    }
    value.clone()
}

pub(crate) fn is_string(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::String(_))
}

pub(crate) fn is_number(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Number(_))
}

pub(crate) fn is_bool(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Bool(_))
}

pub(crate) fn is_object(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Object(_))
}

pub(crate) fn is_callable(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Function(_))
}

pub(crate) fn is_regex(value: &ConfigValue) -> bool {
    matches!(value, ConfigValue::Regex(_))
}
