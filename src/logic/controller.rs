//! Typeahead controller composing scheduler, dispatcher, result set, navigator and history.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::debounce::{DebounceScheduler, TimerToken};
use super::dispatch::{QueryDispatcher, SearchOutcome};
use super::navigator::{KeyboardNavigator, NavKey, NavOutcome};
use super::results::ResultSet;
use crate::config::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_LIMIT, Settings};
use crate::history::{HistoryStore, KeyValueStore};
use crate::sources::SearchApi;
use crate::state::{Category, NavigationIntent, Phase, SearchQuery};


/// Message posted to the controller by its own background tasks.
#[derive(Debug)]
pub enum ControllerEvent {
    /// The debounce timer elapsed for `query`.
    DebounceFired {
        /// Arming the timer belonged to.
        token: TimerToken,
        /// Snapshot taken when the timer was armed.
        query: SearchQuery,
    },
    /// A search request completed.
    SearchFinished(SearchOutcome),
}

/// Tunables for a [`SearchController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Quiet period before dispatch.
    pub debounce: Duration,
    /// Page size.
    pub limit: u32,
    /// Category selected initially.
    pub category: Category,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            limit: DEFAULT_PAGE_LIMIT,
            category: Category::Jobs,
        }
    }
}

impl From<&Settings> for ControllerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            debounce: settings.debounce(),
            limit: settings.page_limit,
            category: settings.default_category,
        }
    }
}

/// Incremental search state machine behind a header search box.
///
/// All state is owned here and mutated through `&mut self` from the host's event loop.
/// Timers and requests run as tokio tasks that only post [`ControllerEvent`]s back on the
/// channel returned by [`SearchController::new`]; the host feeds those into
/// [`SearchController::handle_event`].
pub struct SearchController {
    /// Current input text.
    text: String,
    /// Active category.
    category: Category,
    /// High-level phase.
    phase: Phase,
    /// Whether the dropdown panel is open.
    panel_open: bool,
    /// Quiet period before dispatch.
    debounce: Duration,
    /// Single-slot debounce timer.
    scheduler: DebounceScheduler,
    /// Request issuer and sequence keeper.
    dispatcher: QueryDispatcher,
    /// Accumulated pages.
    results: ResultSet,
    /// Highlight over the visible list.
    navigator: KeyboardNavigator,
    /// Past successful queries.
    history: HistoryStore,
    /// Channel background tasks post to.
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
}

impl SearchController {
    /// What: Build a controller and the channel its background tasks report on.
    ///
    /// Inputs:
    /// - `api`: Search backend.
    /// - `store`: Persistence for the history; read once here.
    /// - `options`: Debounce window, page size and initial category.
    ///
    /// Output:
    /// - The controller and the receiver the host must drain into [`Self::handle_event`].
    pub fn new(
        api: Arc<dyn SearchApi>,
        store: Box<dyn KeyValueStore>,
        options: ControllerOptions,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let history = HistoryStore::load(store);
        let controller = Self {
            text: String::new(),
            category: options.category,
            phase: Phase::Idle,
            panel_open: false,
            debounce: options.debounce,
            scheduler: DebounceScheduler::new(),
            dispatcher: QueryDispatcher::new(api, options.limit),
            results: ResultSet::new(options.limit),
            navigator: KeyboardNavigator::new(),
            history,
            events_tx,
        };
        (controller, events_rx)
    }

    // ----- input -----

    /// What: Replace the query text.
    ///
    /// Details:
    /// - Identical text is a no-op.
    /// - Otherwise results, pagination and highlight reset, in-flight requests become stale,
    ///   and the debounce timer restarts (or is cancelled when the text is blank).
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.query_changed();
    }

    /// Append a typed character.
    pub fn push_char(&mut self, c: char) {
        let mut text = self.text.clone();
        text.push(c);
        self.set_text(text);
    }

    /// Delete the last character.
    pub fn backspace(&mut self) {
        let mut text = self.text.clone();
        if text.pop().is_some() {
            self.set_text(text);
        }
    }

    /// Switch category; treated exactly like a text change.
    pub fn set_category(&mut self, category: Category) {
        if category == self.category {
            return;
        }
        self.category = category;
        self.query_changed();
    }

    /// Switch to the next category in dropdown order.
    pub fn cycle_category(&mut self) {
        self.set_category(self.category.next());
    }

    /// Open the panel (input focused).
    pub fn focus(&mut self) {
        self.panel_open = true;
        self.navigator.arm();
        self.sync_bounds();
    }

    /// Close the panel (blur or outside click). Idempotent.
    pub fn blur(&mut self) {
        self.panel_open = false;
        self.navigator.disarm();
    }

    /// Explicit clear: empty text, no results, no pending timer, panel closed.
    pub fn clear(&mut self) {
        self.text.clear();
        self.query_changed();
        self.blur();
    }

    /// What: Interpret a navigation key.
    ///
    /// Output:
    /// - `Some(intent)` when the host should route to a results page.
    ///
    /// Details:
    /// - Ignored while the panel is closed.
    /// - Enter on a result selects it: the intent is emitted, the text cleared and the panel closed.
    /// - Enter on a history entry makes it the query text.
    /// - Enter with nothing highlighted submits the raw text and closes the panel.
    pub fn handle_key(&mut self, key: NavKey) -> Option<NavigationIntent> {
        match self.navigator.handle(key) {
            NavOutcome::Ignored | NavOutcome::Moved => None,
            NavOutcome::Select(index) => self.select(index),
            NavOutcome::Submit => self.submit(),
        }
    }

    /// Highlight a row directly (pointer hover).
    pub fn hover(&mut self, index: usize) {
        self.navigator.hover(index);
    }

    /// What: Request the next page.
    ///
    /// Output:
    /// - `true` when a request was sent; `false` when nothing more exists, a request is already
    ///   in flight, or the text is blank.
    pub fn load_more(&mut self) -> bool {
        if self.is_blank() || self.results.is_loading() || !self.results.has_more() {
            return false;
        }
        let page = self.results.next_page();
        self.start_dispatch(self.snapshot(), page);
        true
    }

    /// Apply a message from a background task.
    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::DebounceFired { token, query } => {
                if !self.scheduler.take_fired(token) {
                    debug!(?token, "[Search] Ignoring superseded debounce timer");
                    return;
                }
                self.start_dispatch(query, 1);
            }
            ControllerEvent::SearchFinished(outcome) => self.apply_outcome(outcome),
        }
    }

    // ----- views -----

    /// Current input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Active category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// High-level phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Accumulated results.
    #[must_use]
    pub const fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Highlighted row of the visible list.
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.navigator.highlighted()
    }

    /// Whether the dropdown panel is open.
    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Past successful queries, newest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.values()
    }

    /// Whether the panel currently lists history instead of results.
    #[must_use]
    pub fn shows_history(&self) -> bool {
        self.panel_open && self.is_blank() && !self.history.is_empty()
    }

    /// History rows the panel lists right now; empty while results are shown.
    #[must_use]
    pub fn visible_history(&self) -> Vec<String> {
        if self.shows_history() {
            self.history.values()
        } else {
            Vec::new()
        }
    }

    /// Whether a debounce timer is pending.
    #[must_use]
    pub const fn is_debouncing(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Sequence a response must carry to be applied.
    #[must_use]
    pub const fn latest_sequence(&self) -> u64 {
        self.dispatcher.latest_sequence()
    }

    /// What: One-line summary for the panel header.
    ///
    /// Output:
    /// - `None` for blank text; `"Searching..."` while debouncing or loading;
    ///   `"N result(s) found"` or `"No results found"` once settled.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        let line = match self.phase {
            Phase::Debouncing | Phase::Loading => "Searching...".to_string(),
            Phase::Idle | Phase::Settled => match self.results.total() {
                0 => "No results found".to_string(),
                1 => "1 result found".to_string(),
                n => format!("{n} results found"),
            },
        };
        Some(line)
    }

    // ----- internals -----

    /// Whether the text is empty or whitespace.
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Snapshot of the current text and category.
    fn snapshot(&self) -> SearchQuery {
        SearchQuery::new(self.text.clone(), self.category)
    }

    /// Common handling for text and category changes.
    fn query_changed(&mut self) {
        self.navigator.reset();
        self.dispatcher.invalidate();
        self.results.reset();
        if self.is_blank() {
            self.scheduler.cancel();
            self.phase = Phase::Idle;
            self.blur();
            self.sync_bounds();
            debug!("[Search] Input cleared; pending work cancelled");
            return;
        }
        self.panel_open = true;
        self.navigator.arm();
        self.phase = Phase::Debouncing;
        let tx = self.events_tx.clone();
        let query = self.snapshot();
        self.scheduler.schedule(self.debounce, move |token| {
            let _ = tx.send(ControllerEvent::DebounceFired { token, query });
        });
        self.sync_bounds();
    }

    /// Send `query`/`page` and enter the loading phase.
    fn start_dispatch(&mut self, query: SearchQuery, page: u32) {
        let tx = self.events_tx.clone();
        let sent = self.dispatcher.dispatch(query, page, move |outcome| {
            let _ = tx.send(ControllerEvent::SearchFinished(outcome));
        });
        if sent.is_some() {
            self.results.set_loading(true);
            self.phase = Phase::Loading;
        } else {
            self.results.reset();
            self.phase = Phase::Idle;
            self.sync_bounds();
        }
    }

    /// Apply a finished request if it is still current.
    fn apply_outcome(&mut self, outcome: SearchOutcome) {
        if !self.dispatcher.is_current(&outcome) {
            debug!(
                sequence = outcome.sequence,
                latest = self.dispatcher.latest_sequence(),
                query = %outcome.query.text,
                "[Search] Discarding stale response"
            );
            return;
        }
        self.results.set_loading(false);
        self.phase = Phase::Settled;
        match (outcome.page, outcome.result) {
            (1, Ok(page)) => {
                let found = !page.results.is_empty();
                debug!(
                    query = %outcome.query.text,
                    items = page.results.len(),
                    total = page.total,
                    "[Search] Applied first page"
                );
                self.results.replace(page.results, page.total);
                if found {
                    self.history.record(&outcome.query.text);
                }
            }
            (1, Err(e)) => {
                warn!(query = %outcome.query.text, error = %e, "[Search] Search failed");
                self.results.reset();
            }
            (n, Ok(page)) => {
                if n != self.results.next_page() {
                    debug!(page = n, expected = self.results.next_page(), "[Search] Ignoring out-of-order page");
                } else if !self.results.append(page.results, page.total) {
                    debug!(page = n, "[Search] Nothing more to append");
                }
            }
            (n, Err(e)) => {
                warn!(page = n, error = %e, "[Search] Load more failed; keeping loaded pages");
            }
        }
        self.sync_bounds();
    }

    /// Select row `index` of the visible list.
    fn select(&mut self, index: usize) -> Option<NavigationIntent> {
        if self.is_blank() {
            let entry = self.history.get(index)?.to_string();
            self.set_text(entry);
            return None;
        }
        let item_id = self.results.get(index)?.id();
        let intent = NavigationIntent {
            category: self.category,
            query_text: self.text.clone(),
            item_id,
        };
        info!(route = %intent.route(), "[Search] Result selected");
        self.clear();
        Some(intent)
    }

    /// Submit the raw text as a full search.
    fn submit(&mut self) -> Option<NavigationIntent> {
        if self.is_blank() {
            return None;
        }
        let intent = NavigationIntent {
            category: self.category,
            query_text: self.text.clone(),
            item_id: None,
        };
        info!(route = %intent.route(), "[Search] Query submitted");
        self.blur();
        Some(intent)
    }

    /// Recompute navigator bounds from whatever list is visible.
    fn sync_bounds(&mut self) {
        let len = if self.is_blank() {
            if self.panel_open { self.history.len() } else { 0 }
        } else {
            self.results.len()
        };
        self.navigator.set_len(len);
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("text", &self.text)
            .field("category", &self.category)
            .field("phase", &self.phase)
            .field("panel_open", &self.panel_open)
            .field("results", &self.results.len())
            .field("highlighted", &self.navigator.highlighted())
            .finish_non_exhaustive()
    }
}
