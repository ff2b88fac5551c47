//! Command-line argument definition and processing.

use std::time::Duration;

use clap::Parser;
use typeahead::config::Settings;
use typeahead::state::Category;

/// typeahead - Incremental search box for a job/company/people search backend
#[derive(Parser, Debug)]
#[command(name = "typeahead")]
#[command(version)]
#[command(about = "Incremental search box for a job/company/people search backend", long_about = None)]
pub struct Args {
    /// Search endpoint URL (overrides `search_url` in settings.conf)
    #[arg(long)]
    pub url: Option<String>,

    /// Initial category: Jobs, Companies or Peoples
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,

    /// Quiet period in milliseconds before a query is sent
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Run a single search, print the first page and exit
    #[arg(long, value_name = "QUERY")]
    pub once: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// What: Apply command-line overrides on top of file settings.
    ///
    /// Inputs:
    /// - `settings`: Settings loaded from `settings.conf`; mutated in place.
    ///
    /// Details:
    /// - Only flags that were given replace the corresponding setting.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            settings.search_url = url.to_string();
        }
        if let Some(category) = self.category {
            settings.default_category = category;
        }
        if let Some(ms) = self.debounce_ms {
            settings.debounce_ms = ms;
        }
        tracing::debug!(
            url = %settings.search_url,
            category = %settings.default_category,
            debounce = ?Duration::from_millis(settings.debounce_ms),
            "[Config] Effective settings"
        );
    }
}

/// Parse a `--category` value.
fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_config_key(value)
        .ok_or_else(|| format!("unknown category '{value}' (expected Jobs, Companies or Peoples)"))
}
