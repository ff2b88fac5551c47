//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::sources::{SearchApi, SearchError};
use crate::state::{SearchItem, SearchPage, SearchRequest};

/// Scripted behaviour of [`FakeSearchApi`].
#[derive(Default)]
struct FakeState {
    /// Total match count per query text; unknown texts have zero matches.
    totals: HashMap<String, u64>,
    /// Artificial latency per query text.
    delays: HashMap<String, Duration>,
    /// `(text, page)` pairs answered with HTTP 500.
    failures: HashSet<(String, u32)>,
    /// Every request received, in order.
    requests: Vec<SearchRequest>,
}

/// In-process [`SearchApi`] generating deterministic pages.
///
/// Items look like `{"_id": "<text>-<n>", "jobTitle": "<text> result <n>"}` for
/// `n` in the page's slice of `0..total`.
#[derive(Default)]
pub struct FakeSearchApi {
    /// Scripted state.
    state: Mutex<FakeState>,
}

impl FakeSearchApi {
    /// What: Shared fake with no matches for any query.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Lock the scripted state.
    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer `text` with `total` matches.
    pub fn set_total(&self, text: &str, total: u64) {
        self.lock().totals.insert(text.to_string(), total);
    }

    /// Delay answers for `text` by `delay`.
    pub fn set_delay(&self, text: &str, delay: Duration) {
        self.lock().delays.insert(text.to_string(), delay);
    }

    /// Fail `page` of `text` with HTTP 500.
    pub fn fail(&self, text: &str, page: u32) {
        self.lock().failures.insert((text.to_string(), page));
    }

    /// Stop failing `page` of `text`.
    pub fn recover(&self, text: &str, page: u32) {
        self.lock().failures.remove(&(text.to_string(), page));
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.lock().requests.clone()
    }

    /// Query texts of the requests received so far.
    pub fn requested_texts(&self) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .map(|r| r.query.text.clone())
            .collect()
    }
}

#[async_trait]
impl SearchApi for FakeSearchApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let text = request.query.text.clone();
        let (delay, failed, total) = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            (
                state.delays.get(&text).copied(),
                state.failures.contains(&(text.clone(), request.page)),
                state.totals.get(&text).copied().unwrap_or(0),
            )
        };
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        if failed {
            return Err(SearchError::Status(500));
        }
        let limit = u64::from(request.limit);
        let start = u64::from(request.page.saturating_sub(1)) * limit;
        let end = (start + limit).min(total);
        let results = (start..end)
            .map(|n| SearchItem(json!({ "_id": format!("{text}-{n}"), "jobTitle": format!("{text} result {n}") })))
            .collect();
        Ok(SearchPage { results, total })
    }
}
