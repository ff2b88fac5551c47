use regex::RegexBuilder;

/// Piece of a highlighted string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// Slice of the original text.
    pub text: &'a str,
    /// Whether the slice matched the query.
    pub is_match: bool,
}

impl<'a> Fragment<'a> {
    /// Non-matching fragment.
    const fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_match: false,
        }
    }
}

/// What: Split `text` around case-insensitive occurrences of `query`.
///
/// Inputs:
/// - `text`: Display text.
/// - `query`: Raw query; treated literally, never as a pattern.
///
/// Output:
/// - Ordered fragments whose concatenation equals `text`; empty when `text` is empty.
///
/// Details:
/// - An empty query, or one too large to compile into a matcher, yields the whole text as a
///   single non-matching fragment.
#[must_use]
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Fragment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    if query.is_empty() {
        return vec![Fragment::plain(text)];
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        tracing::debug!(query_len = query.len(), "[Highlight] Query rejected; rendering plain");
        return vec![Fragment::plain(text)];
    };
    let mut out = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            out.push(Fragment::plain(&text[last..m.start()]));
        }
        out.push(Fragment {
            text: m.as_str(),
            is_match: true,
        });
        last = m.end();
    }
    if last < text.len() {
        out.push(Fragment::plain(&text[last..]));
    }
    out
}
