use crate::state::{ResultKey, SearchItem};

/// Accumulated result pages for the current query.
///
/// `has_more` is derived, never stored: `loaded_pages * limit < total`.
#[derive(Clone, Debug)]
pub struct ResultSet {
    /// Items of every applied page, in order.
    items: Vec<SearchItem>,
    /// Absolute match count reported by the latest applied page.
    total: u64,
    /// Pages applied since the last reset.
    loaded_pages: u32,
    /// Page size.
    limit: u32,
    /// Request in flight.
    is_loading: bool,
    /// Bumped whenever the set starts over, so positional keys never repeat.
    generation: u64,
}

impl ResultSet {
    /// Empty set paginating by `limit`.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            loaded_pages: 0,
            limit: limit.max(1),
            is_loading: false,
            generation: 0,
        }
    }

    /// Drop every page and stop loading.
    pub fn reset(&mut self) {
        self.items.clear();
        self.total = 0;
        self.loaded_pages = 0;
        self.is_loading = false;
        self.generation += 1;
    }

    /// Start over with a fresh first page.
    pub fn replace(&mut self, items: Vec<SearchItem>, total: u64) {
        self.items = items;
        self.total = total;
        self.loaded_pages = 1;
        self.generation += 1;
    }

    /// What: Append the next page.
    ///
    /// Output:
    /// - `false` (and no change) when there was nothing more to load at call time.
    pub fn append(&mut self, items: Vec<SearchItem>, total: u64) -> bool {
        if !self.has_more() {
            return false;
        }
        self.items.extend(items);
        self.total = total;
        self.loaded_pages += 1;
        true
    }

    /// Whether another page exists beyond the loaded ones.
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.loaded_pages) * u64::from(self.limit) < self.total
    }

    /// Page a load-more should request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.loaded_pages + 1
    }

    /// Toggle the loading indicator.
    pub const fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SearchItem> {
        self.items.get(index)
    }

    /// Number of loaded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Match count reported by the backend.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Pages applied since the last reset.
    #[must_use]
    pub const fn loaded_pages(&self) -> u32 {
        self.loaded_pages
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// What: Stable identity of the row at `index`.
    ///
    /// Output:
    /// - The item's id when present, else a positional key scoped to this generation.
    #[must_use]
    pub fn key(&self, index: usize) -> Option<ResultKey> {
        let item = self.items.get(index)?;
        Some(item.id().map_or(
            ResultKey::Position {
                generation: self.generation,
                index,
            },
            ResultKey::Id,
        ))
    }
}
