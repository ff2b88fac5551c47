use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use super::paths::{config_dir, resolve_settings_config_path};
use crate::state::Category;
use crate::util::config::{parse_key_value, skip_comment_or_empty};

/// Default search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:5000/api/search";
/// Default quiet period before a query is dispatched.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
/// Default page size.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Default HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Commented skeleton written when no settings file exists yet.
const SETTINGS_SKELETON: &str = "\
# typeahead settings
# Lines are `key = value`; `#`, `//` and `;` start comments.

# Search endpoint receiving POST {query, category, page, limit}
search_url = http://localhost:5000/api/search

# Quiet period after the last keystroke before a request is sent
debounce_ms = 400

# Results per page (load more fetches the next page)
page_limit = 10

# HTTP timeout in seconds
request_timeout_secs = 10

# Jobs, Companies or Peoples
default_category = Jobs
";

/// User-tunable settings loaded from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Search endpoint URL.
    pub search_url: String,
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Results per page; always non-zero.
    pub page_limit: u32,
    /// HTTP timeout in seconds.
    pub request_timeout_secs: u64,
    /// Category selected at startup.
    pub default_category: Category,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            default_category: Category::Jobs,
        }
    }
}

impl Settings {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// What: Load user settings from `settings.conf` under HOME/XDG.
///
/// Output:
/// - A `Settings` value; falls back to `Settings::default()` when the file is missing or unreadable.
#[must_use]
pub fn settings() -> Settings {
    let mut out = Settings::default();
    let Some(path) = resolve_settings_config_path() else {
        debug!("[Config] No settings.conf found; using defaults");
        return out;
    };
    match fs::read_to_string(&path) {
        Ok(content) => {
            parse_settings(&content, &mut out);
            debug!(path = %path.display(), ?out, "[Config] Loaded settings");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "[Config] Failed to read settings; using defaults");
        }
    }
    out
}

/// What: Parse settings content into `settings`.
///
/// Inputs:
/// - `content`: Content of the settings file.
/// - `settings`: Settings to populate in place.
///
/// Details:
/// - Unknown keys and unparsable values are ignored, keeping the current value.
/// - `page_limit = 0` is rejected so pagination math never divides the total by zero pages.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "search_url" | "endpoint" | "url" => {
                if !val.is_empty() {
                    settings.search_url = val;
                }
            }
            "debounce_ms" | "debounce" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.debounce_ms = v;
                }
            }
            "page_limit" | "limit" | "page_size" => {
                if let Ok(v) = val.parse::<u32>()
                    && v > 0
                {
                    settings.page_limit = v;
                }
            }
            "request_timeout_secs" | "timeout" => {
                if let Ok(v) = val.parse::<u64>()
                    && v > 0
                {
                    settings.request_timeout_secs = v;
                }
            }
            "default_category" | "category" => {
                if let Some(c) = Category::from_config_key(&val) {
                    settings.default_category = c;
                }
            }
            _ => {
                debug!(key = %key, "[Config] Ignoring unknown settings key");
            }
        }
    }
}

/// What: Write the commented settings skeleton when no settings file exists.
///
/// Output:
/// - Path of the settings file that now exists, or `None` when writing failed.
pub fn ensure_settings_file() -> Option<std::path::PathBuf> {
    if let Some(existing) = resolve_settings_config_path() {
        return Some(existing);
    }
    let path = config_dir().join("settings.conf");
    write_skeleton(&path).then_some(path)
}

/// Write [`SETTINGS_SKELETON`] to `path`, logging failures.
fn write_skeleton(path: &Path) -> bool {
    match fs::write(path, SETTINGS_SKELETON) {
        Ok(()) => {
            debug!(path = %path.display(), "[Config] Wrote settings skeleton");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "[Config] Failed to write settings skeleton");
            false
        }
    }
}
