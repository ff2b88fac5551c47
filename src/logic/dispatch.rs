use std::sync::Arc;

use tracing::debug;

use crate::sources::{SearchApi, SearchError};
use crate::state::{SearchPage, SearchQuery, SearchRequest};

/// Completed request, posted back to the controller for sequence-checked application.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Sequence the request was tagged with.
    pub sequence: u64,
    /// Page that was requested.
    pub page: u32,
    /// Query snapshot the request was sent for.
    pub query: SearchQuery,
    /// Response or failure.
    pub result: Result<SearchPage, SearchError>,
}

/// Issues paginated requests on background tasks and decides which responses are current.
///
/// Every page-1 dispatch takes a fresh sequence number; load-more pages reuse the latest one.
/// [`QueryDispatcher::invalidate`] moves the latest sequence forward without sending, which
/// makes every request still in flight stale. Requests are never aborted at the transport
/// level; their outcomes are simply not applied.
pub struct QueryDispatcher {
    /// Backend.
    api: Arc<dyn SearchApi>,
    /// Page size sent with every request.
    limit: u32,
    /// Latest sequence handed out.
    latest: u64,
}

impl QueryDispatcher {
    /// Dispatcher sending pages of `limit` items to `api`.
    #[must_use]
    pub fn new(api: Arc<dyn SearchApi>, limit: u32) -> Self {
        Self {
            api,
            limit: limit.max(1),
            latest: 0,
        }
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Sequence a response must carry to be applied.
    #[must_use]
    pub const fn latest_sequence(&self) -> u64 {
        self.latest
    }

    /// Supersede everything in flight without sending a request.
    pub fn invalidate(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// What: Send a request for `query` and `page` on a background task.
    ///
    /// Inputs:
    /// - `query`: Snapshot to search for.
    /// - `page`: One-based page; `1` starts a fresh result set.
    /// - `deliver`: Called on the task with the outcome once the request completes.
    ///
    /// Output:
    /// - The request sent, or `None` for blank text (no network call is made).
    ///
    /// Details:
    /// - Page 1 increments the sequence before the request leaves, even when an identical
    ///   request is still in flight, so the most recent intent always wins.
    /// - Must be called from within a tokio runtime.
    pub fn dispatch<F>(&mut self, query: SearchQuery, page: u32, deliver: F) -> Option<SearchRequest>
    where
        F: FnOnce(SearchOutcome) + Send + 'static,
    {
        if query.is_blank() {
            return None;
        }
        let page = page.max(1);
        if page == 1 {
            self.latest += 1;
        }
        let request = SearchRequest {
            query,
            page,
            limit: self.limit,
            sequence: self.latest,
        };
        debug!(
            query = %request.query.text,
            category = %request.query.category,
            page,
            sequence = request.sequence,
            "[Dispatch] Sending search request"
        );
        let api = Arc::clone(&self.api);
        let sent = request.clone();
        tokio::spawn(async move {
            let result = api.search(&sent).await;
            deliver(SearchOutcome {
                sequence: sent.sequence,
                page: sent.page,
                query: sent.query,
                result,
            });
        });
        Some(request)
    }

    /// Whether `outcome` answers the latest dispatch.
    #[must_use]
    pub const fn is_current(&self, outcome: &SearchOutcome) -> bool {
        outcome.sequence == self.latest
    }
}

impl std::fmt::Debug for QueryDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryDispatcher")
            .field("limit", &self.limit)
            .field("latest", &self.latest)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Category;
    use crate::test_utils::FakeSearchApi;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    /// What: Blank text never reaches the backend and leaves the sequence alone.
    async fn blank_query_is_not_sent() {
        let api = FakeSearchApi::new();
        let mut dispatcher = QueryDispatcher::new(api.clone(), 10);
        let sent = dispatcher.dispatch(SearchQuery::new("   ", Category::Jobs), 1, |_| {});
        assert!(sent.is_none());
        assert_eq!(dispatcher.latest_sequence(), 0);
        tokio::task::yield_now().await;
        assert!(api.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    /// What: Only the newest page-1 dispatch is current, whatever the arrival order.
    ///
    /// Inputs:
    /// - Slow `Card` (500ms) then fast `Cardio` (50ms).
    ///
    /// Output:
    /// - `Cardio` arrives first and is current; `Card` arrives later and is stale.
    async fn newer_dispatch_wins_regardless_of_arrival() {
        let api = FakeSearchApi::new();
        api.set_total("Card", 3);
        api.set_total("Cardio", 2);
        api.set_delay("Card", Duration::from_millis(500));
        api.set_delay("Cardio", Duration::from_millis(50));
        let mut dispatcher = QueryDispatcher::new(api.clone(), 10);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let tx1 = tx.clone();
        let slow = dispatcher
            .dispatch(SearchQuery::new("Card", Category::Jobs), 1, move |o| {
                let _ = tx1.send(o);
            })
            .expect("sent");
        let fast = dispatcher
            .dispatch(SearchQuery::new("Cardio", Category::Jobs), 1, move |o| {
                let _ = tx.send(o);
            })
            .expect("sent");
        assert!(fast.sequence > slow.sequence);

        let first = rx.recv().await.expect("first outcome");
        assert_eq!(first.query.text, "Cardio");
        assert!(dispatcher.is_current(&first));
        let second = rx.recv().await.expect("second outcome");
        assert_eq!(second.query.text, "Card");
        assert!(!dispatcher.is_current(&second));
    }

    #[tokio::test(start_paused = true)]
    /// What: Load-more reuses the latest sequence; invalidation makes it stale.
    async fn load_more_shares_sequence_until_invalidated() {
        let api = FakeSearchApi::new();
        api.set_total("Nurse", 35);
        let mut dispatcher = QueryDispatcher::new(api.clone(), 10);
        let q = SearchQuery::new("Nurse", Category::Jobs);
        let first = dispatcher.dispatch(q.clone(), 1, |_| {}).expect("sent");
        let more = dispatcher.dispatch(q, 2, |_| {}).expect("sent");
        assert_eq!(first.sequence, more.sequence);
        assert_eq!(more.limit, 10);
        let next = dispatcher.invalidate();
        assert!(next > more.sequence);
    }
}
