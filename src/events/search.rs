use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::KeyAction;
use crate::logic::{NavKey, SearchController};

#[cfg(test)]
mod tests;

/// What: Handle a key press aimed at the search box.
///
/// Inputs:
/// - `ke`: Key event (press only; the caller filters releases).
/// - `controller`: Search state to mutate.
///
/// Output:
/// - [`KeyAction::Navigate`] when a result or the raw query was chosen, [`KeyAction::Quit`] on
///   Ctrl+C, otherwise [`KeyAction::Continue`].
///
/// Details:
/// - Up/Down/Enter move and choose within the panel.
/// - Tab cycles the category; Ctrl+L loads the next page; Ctrl+U clears the box.
/// - Esc toggles the panel like focusing or leaving the input.
/// - Printable characters and Backspace edit the query.
pub fn handle_search_key(ke: KeyEvent, controller: &mut SearchController) -> KeyAction {
    let ctrl = ke.modifiers.contains(KeyModifiers::CONTROL);
    match ke.code {
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char('u') if ctrl => controller.clear(),
        KeyCode::Char('l') if ctrl => {
            if !controller.load_more() {
                tracing::debug!("[Search] Load more ignored");
            }
        }
        KeyCode::Char(c) if !ctrl && !ke.modifiers.contains(KeyModifiers::ALT) => {
            controller.push_char(c);
        }
        KeyCode::Backspace => controller.backspace(),
        KeyCode::Tab => controller.cycle_category(),
        KeyCode::Esc => {
            if controller.is_panel_open() {
                controller.blur();
            } else {
                controller.focus();
            }
        }
        KeyCode::Up => return nav(controller, NavKey::Up),
        KeyCode::Down => return nav(controller, NavKey::Down),
        KeyCode::Enter => return nav(controller, NavKey::Enter),
        _ => {}
    }
    KeyAction::Continue
}

/// Forward a navigation key and lift a resulting intent into an action.
fn nav(controller: &mut SearchController, key: NavKey) -> KeyAction {
    controller
        .handle_key(key)
        .map_or(KeyAction::Continue, KeyAction::Navigate)
}
