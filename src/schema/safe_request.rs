//! Safe-request restricted attributes: header and cookie names allowed
//! through request forwarding.
//!
//! Children declare the names they need with
//! `requiredSafeRequestRestrictedAttributes`; the root widens the list with
//! `extendSafeRequestRestrictedAttributes`. Both use the same shape.

use super::{array, object, string};
use crate::validation::{FieldPath, Report};
use crate::value::ConfigValue;

pub fn check(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    object(value, path, report, |fields, report| {
        fields.optional("headers", report, names);
        fields.optional("cookies", report, names);
    })
}

fn names(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    array(value, path, report, string)
}
