use ratatui::{
    Frame,
    prelude::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthChar;

use crate::logic::{SearchController, highlight};
use crate::state::SearchItem;

/// Display width reserved for a result's subtitle.
const SUBTITLE_WIDTH: usize = 60;

/// What: Render the dropdown panel below the search box.
///
/// Inputs:
/// - `f`: Frame to draw on.
/// - `controller`: Source of results, history, status and highlight.
/// - `area`: Target rectangle.
///
/// Details:
/// - Nothing is drawn while the panel is closed, or when the text is empty and there is no history.
/// - Empty text lists recent searches; otherwise the status line titles the result list.
/// - When more pages exist the bottom border advertises load more.
pub fn render_panel(f: &mut Frame, controller: &SearchController, area: Rect) {
    if !controller.is_panel_open() {
        return;
    }
    let Some((title, items)) = panel_lines(controller) else {
        return;
    };
    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    if controller.results().has_more() && !controller.results().is_loading() {
        block = block.title_bottom(Line::from(" Ctrl+L: load more ").right_aligned());
    }
    let list = List::new(items.into_iter().map(ListItem::new))
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");
    let mut state = ListState::default();
    state.select(controller.highlighted());
    f.render_stateful_widget(list, area, &mut state);
}

/// What: Build the panel title and one line per visible row.
///
/// Output:
/// - `None` when the text is empty and there is no history to show.
#[must_use]
pub fn panel_lines(controller: &SearchController) -> Option<(String, Vec<Line<'static>>)> {
    let query = controller.text();
    if query.trim().is_empty() {
        let history = controller.visible_history();
        if history.is_empty() {
            return None;
        }
        let dim = Style::default().add_modifier(Modifier::DIM);
        let lines = history
            .into_iter()
            .map(|entry| Line::from(vec![Span::styled("↺ ", dim), Span::raw(entry)]))
            .collect();
        return Some((" Recent searches ".to_string(), lines));
    }
    let status = controller.status_line().unwrap_or_default();
    let lines = controller
        .results()
        .items()
        .iter()
        .map(|item| result_line(item, query))
        .collect();
    Some((format!(" {status} "), lines))
}

/// Title with query matches emphasized, followed by a dimmed subtitle.
fn result_line(item: &SearchItem, query: &str) -> Line<'static> {
    let title = item.title();
    let mut spans: Vec<Span<'static>> = highlight(&title, query)
        .into_iter()
        .map(|frag| {
            if frag.is_match {
                Span::styled(
                    frag.text.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(frag.text.to_string())
            }
        })
        .collect();
    let subtitle = item.subtitle();
    if !subtitle.is_empty() {
        spans.push(Span::styled(
            format!("  {}", truncate_to_width(&subtitle, SUBTITLE_WIDTH)),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    Line::from(spans)
}

/// What: Cut `s` to at most `max` display columns, ending with `…` when shortened.
fn truncate_to_width(s: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            let rest: usize = s[out.len()..].chars().map(|c| c.width().unwrap_or(0)).sum();
            if used + rest <= max {
                out.push_str(&s[out.len()..]);
            } else {
                out.push('…');
            }
            return out;
        }
        used += w;
        out.push(ch);
    }
    out
}
