#![cfg(test)]
// End-to-end controller flows through the public API:
// - keystrokes via the event layer, debounced dispatch, and navigation intents
// - history persisted to disk and rehydrated by a second controller
// - an unreachable HTTP backend degrading to an empty settled state

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use typeahead::events::{KeyAction, handle_event};
use typeahead::history::{FileStore, HISTORY_KEY, KeyValueStore};
use typeahead::logic::{ControllerEvent, ControllerOptions, SearchController};
use typeahead::sources::{HttpSearchApi, SearchApi, SearchError};
use typeahead::state::{Category, Phase, SearchItem, SearchPage, SearchRequest};

/// Backend with fixed totals per query text; items are `{_id: "<text>#<n>", name: "<text> <n>"}`.
struct TableApi {
    totals: HashMap<String, u64>,
    seen: Mutex<Vec<(String, Category, u32)>>,
}

impl TableApi {
    fn with(entries: &[(&str, u64)]) -> Arc<Self> {
        Arc::new(Self {
            totals: entries.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<(String, Category, u32)> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchApi for TableApi {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let text = request.query.text.clone();
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((text.clone(), request.query.category, request.page));
        }
        let total = self.totals.get(&text).copied().unwrap_or(0);
        let limit = u64::from(request.limit);
        let start = u64::from(request.page - 1) * limit;
        let results = (start..(start + limit).min(total))
            .map(|n| SearchItem(json!({ "_id": format!("{text}#{n}"), "name": format!("{text} {n}") })))
            .collect();
        Ok(SearchPage { results, total })
    }
}

fn options() -> ControllerOptions {
    ControllerOptions {
        debounce: Duration::from_millis(400),
        limit: 10,
        category: Category::Jobs,
    }
}

async fn drain(c: &mut SearchController, rx: &mut UnboundedReceiver<ControllerEvent>) {
    while let Ok(Some(ev)) = tokio::time::timeout(Duration::from_secs(30), rx.recv()).await {
        c.handle_event(ev);
    }
}

fn press(c: &mut SearchController, code: KeyCode) -> KeyAction {
    handle_event(CEvent::Key(KeyEvent::new(code, KeyModifiers::empty())), c)
}

#[tokio::test(start_paused = true)]
/// What: Typing, switching category, and choosing a result yields the right route and item.
///
/// Inputs:
/// - Keys "acme", Tab (Companies), Down, Down, Enter against a backend with 4 matches.
///
/// Output:
/// - One request per settled query, the second in Companies; the intent names `acme#1`.
async fn type_switch_category_and_select() {
    let api = TableApi::with(&[("acme", 4)]);
    let dir = tempfile::tempdir().expect("tempdir");
    let backend: Arc<dyn SearchApi> = api.clone();
    let (mut c, mut rx) =
        SearchController::new(backend, Box::new(FileStore::new(dir.path())), options());

    for ch in "acme".chars() {
        press(&mut c, KeyCode::Char(ch));
    }
    drain(&mut c, &mut rx).await;
    press(&mut c, KeyCode::Tab);
    drain(&mut c, &mut rx).await;
    assert_eq!(c.status_line().as_deref(), Some("4 results found"));

    press(&mut c, KeyCode::Down);
    press(&mut c, KeyCode::Down);
    let KeyAction::Navigate(intent) = press(&mut c, KeyCode::Enter) else {
        panic!("expected a navigation intent");
    };
    assert_eq!(intent.item_id.as_deref(), Some("acme#1"));
    assert_eq!(intent.route(), "/search?category=Companies&query=acme");
    assert_eq!(
        api.seen(),
        vec![
            ("acme".to_string(), Category::Jobs, 1),
            ("acme".to_string(), Category::Companies, 1),
        ]
    );
    assert_eq!(c.text(), "");
    assert_eq!(c.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
/// What: History written by one controller is read back by the next one.
///
/// Inputs:
/// - Successful searches "icu" then "cardio" (and a zero-result "zzz"), file store in a temp dir.
///
/// Output:
/// - A fresh controller over the same directory lists `["cardio", "icu"]`.
async fn history_survives_restart() {
    let api = TableApi::with(&[("icu", 2), ("cardio", 1)]);
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let backend: Arc<dyn SearchApi> = api.clone();
        let (mut c, mut rx) =
            SearchController::new(backend, Box::new(FileStore::new(dir.path())), options());
        for text in ["icu", "zzz", "cardio"] {
            c.set_text(text);
            drain(&mut c, &mut rx).await;
        }
    }

    let raw = FileStore::new(dir.path()).get(HISTORY_KEY).expect("history file");
    let stored: Vec<String> = serde_json::from_str(&raw).expect("json array");
    assert_eq!(stored, vec!["cardio".to_string(), "icu".to_string()]);

    let backend: Arc<dyn SearchApi> = api;
    let (mut c, _rx) = SearchController::new(backend, Box::new(FileStore::new(dir.path())), options());
    c.focus();
    assert_eq!(c.visible_history(), stored);
}

#[tokio::test]
/// What: A backend that refuses connections leaves an empty, settled result list.
///
/// Details:
/// - Uses the real HTTP client against a local port with nothing listening.
async fn unreachable_backend_settles_empty() {
    let api = HttpSearchApi::new("http://127.0.0.1:9/api/search", Duration::from_secs(2))
        .expect("client builds");
    let dir = tempfile::tempdir().expect("tempdir");
    let backend: Arc<dyn SearchApi> = Arc::new(api);
    let opts = ControllerOptions {
        debounce: Duration::from_millis(10),
        ..options()
    };
    let (mut c, mut rx) = SearchController::new(backend, Box::new(FileStore::new(dir.path())), opts);

    c.set_text("nurse");
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while c.phase() != Phase::Settled {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(ev)) => c.handle_event(ev),
            _ => break,
        }
    }

    assert_eq!(c.phase(), Phase::Settled);
    assert!(c.results().is_empty());
    assert!(c.history().is_empty());
}
