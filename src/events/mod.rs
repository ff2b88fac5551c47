//! Event handling layer for the typeahead shell.
//!
//! Terminal events are translated into [`SearchController`] calls; the controller owns every
//! piece of search state, so this layer stays stateless.

use crossterm::event::{Event as CEvent, KeyEventKind};

use crate::logic::SearchController;
use crate::state::NavigationIntent;

mod search;

pub use search::handle_search_key;

/// What the host loop should do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running.
    Continue,
    /// Exit the application.
    Quit,
    /// Route to the results page described by the intent.
    Navigate(NavigationIntent),
}

/// What: Dispatch a single terminal event to the controller.
///
/// Inputs:
/// - `ev`: Terminal event.
/// - `controller`: Search state to mutate.
///
/// Output:
/// - The action the host loop should take.
///
/// Details:
/// - Only key presses are handled; repeats and releases are ignored.
/// - Terminal focus loss closes the panel like a click outside the input would.
pub fn handle_event(ev: CEvent, controller: &mut SearchController) -> KeyAction {
    match ev {
        CEvent::Key(ke) if ke.kind == KeyEventKind::Press => handle_search_key(ke, controller),
        CEvent::FocusLost => {
            controller.blur();
            KeyAction::Continue
        }
        CEvent::FocusGained => {
            controller.focus();
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}
