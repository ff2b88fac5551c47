//! Terminal rendering of the search box and its dropdown panel.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::logic::SearchController;

mod panel;
mod search;

pub use panel::{panel_lines, render_panel};
pub use search::render_search;

/// Key help shown in the footer when nothing else needs saying.
const KEY_HELP: &str = "Enter: open  Tab: category  Ctrl+L: load more  Ctrl+U: clear  Esc: close  Ctrl+C: quit";

/// What: Render the whole screen for the current controller state.
///
/// Inputs:
/// - `f`: Frame to draw on.
/// - `controller`: Search state to render.
/// - `notice`: Optional one-line message (e.g. the last navigation route) for the footer.
///
/// Details:
/// - Layout: three-row search box, the dropdown panel filling the middle, one footer row.
pub fn ui(f: &mut Frame, controller: &SearchController, notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_search(f, controller, chunks[0]);
    render_panel(f, controller, chunks[1]);

    let footer = notice.map_or_else(
        || Line::from(Span::styled(KEY_HELP, Style::default().add_modifier(Modifier::DIM))),
        |msg| Line::from(Span::styled(msg.to_string(), Style::default().add_modifier(Modifier::BOLD))),
    );
    f.render_widget(Paragraph::new(footer), chunks[2]);
}
