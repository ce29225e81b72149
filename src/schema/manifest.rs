//! Web app manifest shape.
//!
//! The manifest is a closed record: `name` is required, everything else is
//! optional, and unknown keys are rejected at the top level and inside every
//! array item.

use super::{Alternative, array, boolean, formats, is_string, object, one_of, pattern, string, uri};
use crate::validation::{FieldPath, Report};
use crate::value::ConfigValue;

/// Allowed `orientation` values.
pub const ORIENTATIONS: &[&str] = &[
    "any",
    "natural",
    "landscape",
    "landscape-primary",
    "landscape-secondary",
    "portrait",
    "portrait-primary",
    "portrait-secondary",
];

/// Allowed `display` values.
pub const DISPLAY_MODES: &[&str] = &["fullscreen", "standalone", "minimal-ui", "browser"];

/// Allowed `dir` values.
pub const TEXT_DIRECTIONS: &[&str] = &["auto", "ltr", "rtl"];

/// Allowed `icons[].purpose` values.
pub const ICON_PURPOSES: &[&str] = &["any", "maskable", "badge"];

/// Check a web app manifest found at `path`.
pub fn check(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    object(value, path, report, |fields, report| {
        fields.required("name", report, string);
        fields.optional("short_name", report, string);
        fields.optional("lang", report, string);
        fields.optional("scope", report, root_relative);
        fields.optional("start_url", report, root_relative);
        fields.optional("theme_color", report, color);
        fields.optional("background_color", report, color);
        fields.optional("categories", report, |v, p, r| array(v, p, r, string));
        fields.optional("iarc_rating_id", report, boolean);
        fields.optional("prefer_related_applications", report, boolean);
        fields.optional("related_applications", report, |v, p, r| array(v, p, r, related_application));
        fields.optional("orientation", report, |v, p, r| one_of(v, p, r, ORIENTATIONS));
        fields.optional("display", report, |v, p, r| one_of(v, p, r, DISPLAY_MODES));
        fields.optional("dir", report, |v, p, r| one_of(v, p, r, TEXT_DIRECTIONS));
        fields.optional("icons", report, |v, p, r| array(v, p, r, icon));
        fields.optional("screenshots", report, |v, p, r| array(v, p, r, screenshot));
    })
}

fn root_relative(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    pattern(value, path, report, formats::is_root_relative, formats::ROOT_RELATIVE_PATTERN)
}

// Any string, or bare hex digits.
fn color(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    super::alternatives(
        value,
        path,
        report,
        &[
            Alternative {
                label: "string",
                accepts: is_string,
                check: &string,
            },
            Alternative {
                label: "string",
                accepts: is_string,
                check: &|v, p, r| {
                    let before = r.violation_count();
                    string(v, p, r);
                    if r.violation_count() == before && !v.as_str().is_some_and(formats::is_hex) {
                        r.shape(p, "must only contain hexadecimal characters");
                    }
                    v.clone()
                },
            },
        ],
    )
}

fn related_application(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    object(value, path, report, |fields, report| {
        fields.optional("platform", report, string);
        fields.optional("url", report, string);
        fields.optional("id", report, string);
    })
}

fn icon(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    object(value, path, report, |fields, report| {
        fields.optional("src", report, uri);
        fields.optional("sizes", report, string);
        fields.optional("type", report, string);
        fields.optional("purpose", report, |v, p, r| one_of(v, p, r, ICON_PURPOSES));
    })
}

fn screenshot(value: &ConfigValue, path: &FieldPath, report: &mut Report) -> ConfigValue {
    object(value, path, report, |fields, report| {
        fields.optional("src", report, uri);
        fields.optional("sizes", report, string);
        fields.optional("type", report, string);
    })
}
