//! Shared state configuration.
//!
//! The root module provides values with `provideStateConfig`: each key maps
//! to a `server` and a `client` value, both of which must be present (either
//! may be null). A value is a primitive or a flat map of primitives.
//!
//! Child modules describe how they want those values checked with
//! `validateStateConfig`: each key may carry a `validate` callable per side.

use super::{Alternative, entries, function, is_bool, is_number, is_object, is_string, number, object, string};
use crate::validation::{FieldPath, Report};
use crate::value::ConfigValue;

/// Check a `provideStateConfig` mapping.
pub fn check_provided(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    entries(value, path, report, |_, entry, path, report| {
        object(entry, path, report, |fields, report| {
            fields.required("server", report, provided_value);
            fields.required("client", report, provided_value);
        })
    })
}

/// Check a `validateStateConfig` mapping.
pub fn check_validators(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    entries(value, path, report, |_, entry, path, report| {
        object(entry, path, report, |fields, report| {
            fields.optional("server", report, side_validator);
            fields.optional("client", report, side_validator);
        })
    })
}

fn side_validator(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    object(value, path, report, |fields, report| {
        fields.optional("validate", report, |v, p, r| function(v, p, r, Some(1)));
    })
}

fn is_blank(value: &ConfigValue) -> bool {
    value.is_null() || value.as_str() == Some("")
}

fn finite(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    number(value, path, report, false)
}

fn keep(value: &ConfigValue, _: &FieldPath, _: &mut Report) -> ConfigValue {
    value.clone()
}

fn provided_value(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    if is_blank(value) {
        return value.clone();
    }
    super::alternatives(
        value,
        path,
        report,
        &[
            Alternative { label: "number", accepts: is_number, check: &finite },
            Alternative { label: "boolean", accepts: is_bool, check: &keep },
            Alternative { label: "string", accepts: is_string, check: &string },
            Alternative {
                label: "object",
                accepts: is_object,
                check: &|v, p, r| entries(v, p, r, |_, item, p, r| flat_value(item, p, r)),
            },
        ],
    )
}

fn flat_value(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    if is_blank(value) {
        return value.clone();
    }
    super::alternatives(
        value,
        path,
        report,
        &[
            Alternative { label: "number", accepts: is_number, check: &finite },
            Alternative { label: "boolean", accepts: is_bool, check: &keep },
            Alternative { label: "string", accepts: is_string, check: &string },
        ],
    )
}
