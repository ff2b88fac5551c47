//! Small utility helpers for URL encoding, JSON field extraction and config values.

pub mod config;

use serde_json::Value;
use std::fmt::Write;

/// What: Percent-encode a string for use in URLs according to RFC 3986.
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Returns a percent-encoded string where reserved characters are escaped.
///
/// Details:
/// - Unreserved characters (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`) are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - Non-ASCII input is escaped byte by byte from its UTF-8 form.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// What: Extract the first non-empty string among candidate keys.
///
/// Inputs:
/// - `v`: JSON object to read.
/// - `keys`: Candidate keys in priority order.
///
/// Output:
/// - `Some(String)` for the first key mapping to a string with visible content, else `None`.
///
/// Details:
/// - Empty and whitespace-only strings are skipped so the next candidate wins.
#[must_use]
pub fn first_non_empty(v: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| v.get(*k).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// What: Join the string elements of an array field.
///
/// Inputs:
/// - `v`: JSON object to read.
/// - `key`: Field holding an array.
/// - `sep`: Separator placed between elements.
///
/// Output:
/// - Joined string; empty when the field is missing, not an array, or holds no strings.
#[must_use]
pub fn joined_strings(v: &Value, key: &str, sep: &str) -> String {
    v.get(key)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(sep)
        })
        .unwrap_or_default()
}
