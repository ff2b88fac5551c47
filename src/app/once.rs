use std::io::IsTerminal;

use crossterm::style::Stylize;

use typeahead::config::Settings;
use typeahead::logic::highlight;
use typeahead::sources::SearchApi;
use typeahead::state::{SearchItem, SearchPage, SearchQuery, SearchRequest};

use super::Result;

/// What: Search once for `query` and print the first page to stdout.
///
/// Inputs:
/// - `api`: Backend to query.
/// - `prefs`: Effective settings (category and page size).
/// - `query`: Raw query text; must not be blank.
///
/// Output:
/// - `Ok(())` after printing; `Err` for a blank query or a failed request.
///
/// Details:
/// - Matches are emphasized only when stdout is a terminal.
pub async fn run_once(api: &dyn SearchApi, prefs: &Settings, query: &str) -> Result<()> {
    let query = SearchQuery::new(query, prefs.default_category);
    if query.is_blank() {
        return Err("query must not be empty".into());
    }
    let request = SearchRequest {
        query,
        page: 1,
        limit: prefs.page_limit,
        sequence: 1,
    };
    tracing::info!(
        query = %request.query.text,
        category = %request.query.category,
        "[Search] Single search"
    );
    let page = api.search(&request).await?;
    let styled = std::io::stdout().is_terminal();
    for line in format_page(&page, &request.query.text, styled) {
        println!("{line}");
    }
    Ok(())
}

/// Result lines followed by a summary line.
fn format_page(page: &SearchPage, query: &str, styled: bool) -> Vec<String> {
    let mut out: Vec<String> = page
        .results
        .iter()
        .map(|item| format_item(item, query, styled))
        .collect();
    let shown = page.results.len();
    out.push(match page.total {
        0 => "No results found".to_string(),
        1 => "1 result found".to_string(),
        n if n > u64::try_from(shown).unwrap_or(u64::MAX) => {
            format!("{n} results found (showing {shown})")
        }
        n => format!("{n} results found"),
    });
    out
}

/// One result as `title  subtitle`.
fn format_item(item: &SearchItem, query: &str, styled: bool) -> String {
    let title = item.title();
    let mut line: String = highlight(&title, query)
        .into_iter()
        .map(|frag| {
            if styled && frag.is_match {
                frag.text.bold().yellow().to_string()
            } else {
                frag.text.to_string()
            }
        })
        .collect();
    let subtitle = item.subtitle();
    if !subtitle.is_empty() {
        line.push_str("  ");
        line.push_str(&if styled { subtitle.dim().to_string() } else { subtitle });
    }
    line
}
