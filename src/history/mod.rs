//! Bounded, deduplicated search history persisted through a [`KeyValueStore`].

mod store;

use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::{debug, warn};

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Maximum number of history entries to retain (most-recent-first).
pub const HISTORY_CAPACITY: usize = 10;

/// Key under which the history is persisted as a JSON array of strings.
pub const HISTORY_KEY: &str = "searchHistory";

/// What: Provide the non-zero capacity used by the history LRU cache.
///
/// Output:
/// - Non-zero capacity for the history cache.
///
/// Details:
/// - Evaluated at compile time; a zero capacity fails the build rather than panicking at runtime.
#[must_use]
pub const fn history_capacity() -> NonZeroUsize {
    const CAPACITY: NonZeroUsize = match NonZeroUsize::new(HISTORY_CAPACITY) {
        Some(n) => n,
        None => panic!("HISTORY_CAPACITY must be non-zero"),
    };
    CAPACITY
}

/// Past successful queries, newest first.
///
/// Entries are case-sensitive and unique; recording an existing entry moves it to the front.
/// Every mutation is written through to the backing store before `record` returns.
pub struct HistoryStore {
    /// Entries keyed by exact text; LRU order is the display order.
    entries: LruCache<String, ()>,
    /// Persistence backend.
    store: Box<dyn KeyValueStore>,
}

impl HistoryStore {
    /// What: Hydrate the history from `store`.
    ///
    /// Inputs:
    /// - `store`: Backend holding [`HISTORY_KEY`].
    ///
    /// Output:
    /// - History with the persisted entries, or empty when the key is missing or malformed.
    ///
    /// Details:
    /// - Lists longer than the capacity keep their newest entries; duplicates collapse.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let mut entries = LruCache::new(history_capacity());
        let persisted = store.get(HISTORY_KEY).map(|raw| parse_history(&raw)).unwrap_or_default();
        // Insert oldest first so the newest ends up most-recently-used.
        for text in persisted.into_iter().take(HISTORY_CAPACITY).rev() {
            entries.put(text, ());
        }
        debug!(entries = entries.len(), "[History] Hydrated search history");
        Self { entries, store }
    }

    /// What: Record a successful query.
    ///
    /// Inputs:
    /// - `text`: Exact query text; blank text is ignored.
    ///
    /// Details:
    /// - Moves an existing entry to the front, otherwise prepends and evicts the oldest.
    /// - Persists synchronously; write failures are logged and the in-memory state is kept.
    pub fn record(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.entries.put(text.to_string(), ());
        self.persist();
    }

    /// Entries newest first.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.entries.iter().map(|(k, ())| k.clone()).collect()
    }

    /// Entry at `index` in newest-first order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.iter().nth(index).map(|(k, ())| k.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no query has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the current entries to the store as a JSON array.
    fn persist(&mut self) {
        let values = self.values();
        match serde_json::to_string(&values) {
            Ok(s) => match self.store.set(HISTORY_KEY, &s) {
                Ok(()) => {
                    debug!(entries = values.len(), bytes = s.len(), "[History] Persisted search history");
                }
                Err(e) => {
                    warn!(error = %e, "[History] Failed to persist search history");
                }
            },
            Err(e) => {
                warn!(error = %e, "[History] Failed to serialize search history");
            }
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.values())
            .finish_non_exhaustive()
    }
}

/// What: Parse the persisted form of the history.
///
/// Output:
/// - The stored strings, or an empty list when `raw` is not a JSON array of strings.
fn parse_history(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(values) => values,
        Err(e) => {
            debug!(error = %e, "[History] Discarding malformed persisted history");
            Vec::new()
        }
    }
}
