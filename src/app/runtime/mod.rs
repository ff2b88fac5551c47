use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{select, sync::mpsc};

use typeahead::config::{ensure_settings_file, settings, store_dir};
use typeahead::events::{KeyAction, handle_event};
use typeahead::history::FileStore;
use typeahead::logic::{ControllerOptions, SearchController};
use typeahead::sources::{HttpSearchApi, SearchApi};
use typeahead::ui::ui;

use super::Result;
use super::once::run_once;
use super::terminal::{restore_terminal, setup_terminal};
use crate::args::Args;

mod background;

use background::spawn_event_thread;

/// What: Run typeahead end-to-end: resolve settings, build the controller, drive the terminal
/// event loop, and restore the terminal on exit.
///
/// Inputs:
/// - `args`: Parsed command line; its flags override `settings.conf`.
///
/// Output:
/// - `Ok(())` on a clean exit; `Err` on unrecoverable terminal or client construction errors.
///
/// Details:
/// - `--once` skips the terminal entirely and prints a single page.
/// - The loop redraws after every terminal or controller event.
/// - Navigation intents are logged and shown in the footer; the last route is printed on exit.
pub async fn run(args: Args) -> Result<()> {
    if let Some(path) = ensure_settings_file() {
        tracing::debug!(path = %path.display(), "[Config] Using settings file");
    }
    let mut prefs = settings();
    args.apply_overrides(&mut prefs);

    let api = HttpSearchApi::new(prefs.search_url.clone(), prefs.request_timeout())?;
    tracing::info!(
        url = %api.url(),
        category = %prefs.default_category,
        debounce_ms = prefs.debounce_ms,
        limit = prefs.page_limit,
        "[Runtime] Search client ready"
    );
    if let Some(query) = args.once.as_deref() {
        return run_once(&api, &prefs, query).await;
    }
    let api: Arc<dyn SearchApi> = Arc::new(api);
    let store = FileStore::new(store_dir());
    let (mut controller, mut controller_rx) =
        SearchController::new(api, Box::new(store), ControllerOptions::from(&prefs));

    setup_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let event_thread_cancelled = Arc::new(AtomicBool::new(false));
    spawn_event_thread(event_tx, Arc::clone(&event_thread_cancelled));

    controller.focus();
    let mut last_route: Option<String> = None;
    loop {
        if let Err(e) = terminal.draw(|f| ui(f, &controller, last_route.as_deref())) {
            tracing::warn!(error = %e, "[Runtime] Draw failed");
        }

        select! {
            Some(ev) = event_rx.recv() => {
                match handle_event(ev, &mut controller) {
                    KeyAction::Quit => break,
                    KeyAction::Navigate(intent) => {
                        let route = intent.route();
                        tracing::info!(
                            route = %route,
                            item = intent.item_id.as_deref().unwrap_or("-"),
                            "[Runtime] Navigation requested"
                        );
                        last_route = Some(route);
                    }
                    KeyAction::Continue => {}
                }
            }
            Some(ev) = controller_rx.recv() => controller.handle_event(ev),
            else => break,
        }
    }

    // Signal event reading thread to exit immediately
    event_thread_cancelled.store(true, Ordering::Relaxed);
    restore_terminal()?;
    if let Some(route) = last_route {
        println!("{route}");
    }
    Ok(())
}
