//! Line-level helpers for `key = value` configuration files.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character.
/// - Keys are lowercased with `.`, `-` and spaces folded to `_`.
/// - Inline comments (`# ...`, `// ...`) are stripped from the value, except inside URLs.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_value) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_value).to_string()))
}

/// What: Remove a trailing inline comment from a value.
///
/// Details:
/// - `//` preceded by `:` (as in `http://`) is kept so URLs survive.
/// - `#` only starts a comment when preceded by whitespace, so URL fragments survive.
fn strip_inline_comment(value: &str) -> &str {
    let mut end = value.len();
    let bytes = value.as_bytes();
    for (i, w) in bytes.windows(2).enumerate() {
        let is_slash_comment = w == b"//" && (i == 0 || bytes[i - 1] != b':');
        let is_hash_comment = w[1] == b'#' && w[0].is_ascii_whitespace();
        if is_slash_comment {
            end = i;
            break;
        }
        if is_hash_comment {
            end = i + 1;
            break;
        }
    }
    if value.starts_with('#') {
        end = 0;
    }
    value[..end].trim()
}
