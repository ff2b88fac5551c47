use ratatui::{
    Frame,
    prelude::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::logic::SearchController;
use crate::state::Category;

/// Prompt drawn before the query text.
const PROMPT: &str = "> ";

/// What: Render the search input box and place the cursor after the text.
///
/// Inputs:
/// - `f`: Frame to draw on.
/// - `controller`: Source of text, category and focus.
/// - `area`: Target rectangle (three rows including borders).
///
/// Details:
/// - The title lists every category with the active one bracketed; the border dims while the
///   panel is closed.
/// - The cursor column uses display width so wide characters keep it aligned.
pub fn render_search(f: &mut Frame, controller: &SearchController, area: Rect) {
    let focused = controller.is_panel_open();
    let accent = if focused { Color::Cyan } else { Color::DarkGray };
    let mut title_spans = vec![Span::raw(" Search ")];
    for category in Category::ALL {
        if category == controller.category() {
            title_spans.push(Span::styled(
                format!("[{category}]"),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));
        } else {
            title_spans.push(Span::styled(
                format!(" {category} "),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
    }
    title_spans.push(Span::raw(" "));
    let title = Line::from(title_spans);
    let input = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(accent)),
        Span::raw(controller.text().to_string()),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent));
    f.render_widget(Paragraph::new(input).block(block), area);

    let text_w = u16::try_from(PROMPT.width() + controller.text().width()).unwrap_or(u16::MAX);
    let right = area.x.saturating_add(area.width.saturating_sub(2));
    let x = area.x.saturating_add(1).saturating_add(text_w).min(right);
    f.set_cursor_position(Position::new(x, area.y.saturating_add(1)));
}
