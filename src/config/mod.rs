//! Configuration: settings file parsing and on-disk locations.

pub mod paths;
mod settings;

pub use paths::{config_dir, logs_dir, store_dir};
pub use settings::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_LIMIT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_URL,
    Settings, ensure_settings_file, parse_settings, settings,
};
