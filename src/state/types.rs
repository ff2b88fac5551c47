//! Core value types shared by the search controller, its workers and the host shell.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::{first_non_empty, joined_strings, percent_encode};

/// Candidate fields for an item's display title, in priority order.
const TITLE_FIELDS: &[&str] = &["jobTitle", "name", "username", "headline", "title"];
/// Candidate fields for an item's display subtitle, in priority order.
const SUBTITLE_FIELDS: &[&str] = &[
    "jobDescription",
    "about",
    "industry",
    "overview",
    "tagline",
    "locationName",
    "locationAddress",
];
/// Title shown when an item carries none of the title fields.
const FALLBACK_TITLE: &str = "Result";

/// Which collection a query searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Job postings.
    #[default]
    Jobs,
    /// Business profiles.
    Companies,
    /// User profiles.
    Peoples,
}

impl Category {
    /// Every category in dropdown order.
    pub const ALL: [Self; 3] = [Self::Jobs, Self::Companies, Self::Peoples];

    /// Wire/display name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jobs => "Jobs",
            Self::Companies => "Companies",
            Self::Peoples => "Peoples",
        }
    }

    /// What: Cycle to the following category, wrapping around.
    ///
    /// Output:
    /// - `Jobs -> Companies -> Peoples -> Jobs`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Jobs => Self::Companies,
            Self::Companies => Self::Peoples,
            Self::Peoples => Self::Jobs,
        }
    }

    /// What: Parse a category from a config value or CLI flag.
    ///
    /// Inputs:
    /// - `value`: Case-insensitive name; `people`/`users` and `company` are accepted aliases.
    ///
    /// Output:
    /// - `Some(Category)` when recognized, `None` otherwise.
    #[must_use]
    pub fn from_config_key(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jobs" | "job" => Some(Self::Jobs),
            "companies" | "company" => Some(Self::Companies),
            "peoples" | "people" | "users" => Some(Self::Peoples),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of the user's intent, taken when a timer is armed or a request is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    /// Raw text as typed.
    pub text: String,
    /// Collection to search.
    pub category: Category,
}

impl SearchQuery {
    /// Build a snapshot from the current text and category.
    #[must_use]
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// Whether the text carries nothing worth searching for (empty or whitespace only).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One paginated request as handed to a [`crate::sources::SearchApi`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query snapshot.
    pub query: SearchQuery,
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Monotonic tag used to discard stale responses.
    pub sequence: u64,
}

/// A single search hit. The backend returns heterogeneous records per category, so the item
/// stays an opaque JSON object and only display fields are derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchItem(pub Value);

impl SearchItem {
    /// Stable identifier (`_id`, then `id`) when the record carries one.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        first_non_empty(&self.0, &["_id", "id"]).or_else(|| {
            ["_id", "id"]
                .iter()
                .find_map(|k| self.0.get(*k).and_then(Value::as_u64))
                .map(|n| n.to_string())
        })
    }

    /// Display title: first non-empty title field, else `"Result"`.
    #[must_use]
    pub fn title(&self) -> String {
        first_non_empty(&self.0, TITLE_FIELDS).unwrap_or_else(|| FALLBACK_TITLE.to_string())
    }

    /// Display subtitle: first non-empty subtitle field, else the skills list, else empty.
    #[must_use]
    pub fn subtitle(&self) -> String {
        first_non_empty(&self.0, SUBTITLE_FIELDS)
            .unwrap_or_else(|| joined_strings(&self.0, "skills", ", "))
    }
}

/// Decoded body of a search response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SearchPage {
    /// Items of the requested page.
    #[serde(default)]
    pub results: Vec<SearchItem>,
    /// Absolute number of matches across all pages.
    #[serde(default)]
    pub total: u64,
}

/// Identity of a rendered row.
///
/// Positional keys embed the result-set generation so they are never reused across resets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResultKey {
    /// Backend-provided id.
    Id(String),
    /// Fallback when the item has no id.
    Position {
        /// Result-set generation the index belongs to.
        generation: u64,
        /// Index within the result list.
        index: usize,
    },
}

/// High-level controller phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No text entered.
    #[default]
    Idle,
    /// Text entered, timer armed.
    Debouncing,
    /// A request is in flight.
    Loading,
    /// Results (or the empty state) are on screen.
    Settled,
}

/// Request for the host shell to route to a full results page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationIntent {
    /// Category active at selection time.
    pub category: Category,
    /// Query text the results page should search for.
    pub query_text: String,
    /// Id of the chosen item, when an item (rather than raw text) was selected.
    pub item_id: Option<String>,
}

impl NavigationIntent {
    /// What: Render the intent as the results-page route.
    ///
    /// Output:
    /// - `/search?category=<Category>&query=<percent-encoded text>`
    #[must_use]
    pub fn route(&self) -> String {
        format!(
            "/search?category={}&query={}",
            percent_encode(self.category.as_str()),
            percent_encode(&self.query_text)
        )
    }
}
