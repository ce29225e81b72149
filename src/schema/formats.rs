//! String formats recognised by the schema primitives.

use regex::Regex;
use std::net::IpAddr;
use std::sync::OnceLock;

/// Compile a constant pattern once. `None` only if the pattern is invalid,
/// in which case every match attempt fails.
fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// A DNS hostname (RFC 1123 labels) or an IP address.
pub fn is_hostname(input: &str) -> bool {
    if input.parse::<IpAddr>().is_ok() {
        return true;
    }
    let host = input.strip_suffix('.').unwrap_or(input);
    if host.is_empty() || host.len() > 255 {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// An absolute URI: a scheme followed by a non-blank remainder.
pub fn is_uri(input: &str) -> bool {
    static URI: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&URI, r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s]+$").is_some_and(|re| re.is_match(input))
}

/// Loose origin fragment accepted for CORS origins, searched anywhere in
/// the string.
pub fn is_origin_fragment(input: &str) -> bool {
    static ORIGIN: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&ORIGIN, r"(?:https?)?[a-z.\-]").is_some_and(|re| re.is_match(input))
}

/// Hexadecimal digits only (colour codes without the `#`).
pub fn is_hex(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_hexdigit())
}

/// Path anchored at the site root, rendered in messages as `/^\//`.
pub fn is_root_relative(input: &str) -> bool {
    input.starts_with('/')
}

/// Display form of the root-relative pattern.
pub const ROOT_RELATIVE_PATTERN: &str = r"^\/";

/// Parse a decimal numeric string the way a lenient form field would.
///
/// `"Infinity"`, `"NaN"` and blank strings are not numbers.
pub fn parse_numeric(input: &str) -> Option<f64> {
    static NUMERIC: OnceLock<Option<Regex>> = OnceLock::new();
    let trimmed = input.trim();
    let re = cached(&NUMERIC, r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$")?;
    if !re.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
