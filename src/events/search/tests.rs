use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;

use super::*;
use crate::events::handle_event;
use crate::history::MemoryStore;
use crate::logic::{ControllerEvent, ControllerOptions};
use crate::sources::SearchApi;
use crate::state::{Category, Phase};
use crate::test_utils::FakeSearchApi;

fn new_controller(api: &Arc<FakeSearchApi>) -> (SearchController, UnboundedReceiver<ControllerEvent>) {
    let api: Arc<dyn SearchApi> = api.clone();
    SearchController::new(api, Box::new(MemoryStore::new()), ControllerOptions::default())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(c: &mut SearchController, text: &str) {
    for ch in text.chars() {
        assert_eq!(handle_search_key(key(KeyCode::Char(ch)), c), KeyAction::Continue);
    }
}

async fn drain(c: &mut SearchController, rx: &mut UnboundedReceiver<ControllerEvent>) {
    while let Ok(Some(event)) = tokio::time::timeout(Duration::from_secs(30), rx.recv()).await {
        c.handle_event(event);
    }
}

#[tokio::test(start_paused = true)]
/// What: Typed characters and Backspace edit the query and open the panel.
///
/// Inputs:
/// - Keys `n`, `u`, `r`, `s`, `e`, `s`, then Backspace.
///
/// Output:
/// - Text "nurse" with the panel open and a timer pending.
async fn typing_edits_query() {
    let api = FakeSearchApi::new();
    let (mut c, _rx) = new_controller(&api);

    type_text(&mut c, "nurses");
    handle_search_key(key(KeyCode::Backspace), &mut c);

    assert_eq!(c.text(), "nurse");
    assert!(c.is_panel_open());
    assert_eq!(c.phase(), Phase::Debouncing);
}

#[tokio::test(start_paused = true)]
/// What: Control chords map to quit, clear and load more instead of inserting text.
async fn control_chords() {
    let api = FakeSearchApi::new();
    api.set_total("rn", 25);
    let (mut c, mut rx) = new_controller(&api);

    type_text(&mut c, "rn");
    drain(&mut c, &mut rx).await;
    assert_eq!(c.results().len(), 10);

    assert_eq!(handle_search_key(ctrl('l'), &mut c), KeyAction::Continue);
    drain(&mut c, &mut rx).await;
    assert_eq!(c.results().len(), 20);
    assert_eq!(c.text(), "rn");

    handle_search_key(ctrl('u'), &mut c);
    assert_eq!(c.text(), "");
    assert!(c.results().is_empty());

    assert_eq!(handle_search_key(ctrl('c'), &mut c), KeyAction::Quit);
}

#[tokio::test(start_paused = true)]
/// What: Tab cycles categories through every option and back.
async fn tab_cycles_category() {
    let api = FakeSearchApi::new();
    let (mut c, _rx) = new_controller(&api);

    let mut seen = vec![c.category()];
    for _ in 0..3 {
        handle_search_key(key(KeyCode::Tab), &mut c);
        seen.push(c.category());
    }
    assert_eq!(
        seen,
        vec![Category::Jobs, Category::Companies, Category::Peoples, Category::Jobs]
    );
}

#[tokio::test(start_paused = true)]
/// What: Arrow keys and Enter choose a result and produce a navigation action.
async fn enter_navigates() {
    let api = FakeSearchApi::new();
    api.set_total("icu", 3);
    let (mut c, mut rx) = new_controller(&api);

    type_text(&mut c, "icu");
    drain(&mut c, &mut rx).await;
    handle_search_key(key(KeyCode::Down), &mut c);

    match handle_search_key(key(KeyCode::Enter), &mut c) {
        KeyAction::Navigate(intent) => {
            assert_eq!(intent.item_id.as_deref(), Some("icu-0"));
            assert_eq!(intent.query_text, "icu");
        }
        other => panic!("expected navigation, got {other:?}"),
    }
    assert_eq!(c.text(), "");
}

#[tokio::test(start_paused = true)]
/// What: Esc toggles the panel; arrows do nothing while it is closed.
async fn esc_toggles_panel() {
    let api = FakeSearchApi::new();
    api.set_total("icu", 3);
    let (mut c, mut rx) = new_controller(&api);

    type_text(&mut c, "icu");
    drain(&mut c, &mut rx).await;
    handle_search_key(key(KeyCode::Esc), &mut c);
    assert!(!c.is_panel_open());
    handle_search_key(key(KeyCode::Down), &mut c);
    assert_eq!(c.highlighted(), None);

    handle_search_key(key(KeyCode::Esc), &mut c);
    assert!(c.is_panel_open());
    handle_search_key(key(KeyCode::Down), &mut c);
    assert_eq!(c.highlighted(), Some(0));
}

#[tokio::test(start_paused = true)]
/// What: Key releases are ignored and focus loss closes the panel.
async fn releases_and_focus_events() {
    let api = FakeSearchApi::new();
    let (mut c, _rx) = new_controller(&api);

    let mut release = key(KeyCode::Char('x'));
    release.kind = KeyEventKind::Release;
    assert_eq!(handle_event(CEvent::Key(release), &mut c), KeyAction::Continue);
    assert_eq!(c.text(), "");

    assert_eq!(handle_event(CEvent::Key(key(KeyCode::Char('x'))), &mut c), KeyAction::Continue);
    assert!(c.is_panel_open());
    handle_event(CEvent::FocusLost, &mut c);
    assert!(!c.is_panel_open());
    handle_event(CEvent::FocusGained, &mut c);
    assert!(c.is_panel_open());
}
