//! Header bar: source, refresh state, search input and messages.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt;
use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Styles;

/// Renders the one-line header.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let page = &state.page;

    let mut spans = vec![
        Span::styled(" recent-txns ", Styles::header()),
        Span::raw(format!(" {} ", state.source_name)),
    ];

    if state.paused {
        spans.push(Span::styled("PAUSED", Styles::warning()));
    } else {
        spans.push(Span::styled("LIVE", Styles::accent()));
    }

    if let Some(ts) = page.last_refresh {
        spans.push(Span::styled(
            format!("  updated {}", fmt::format_clock(ts)),
            Styles::dim(),
        ));
    }

    if state.input_mode == InputMode::Search {
        spans.push(Span::raw("  /"));
        spans.push(Span::styled(format!("{}_", page.search), Styles::search_input()));
    } else if !page.search.is_empty() {
        spans.push(Span::raw(format!("  search: {}", page.search)));
    }

    if page.filters.time_range.is_active() {
        spans.push(Span::styled(
            format!("  longer than {}", page.filters.time_range),
            Styles::accent(),
        ));
    }

    if let Some(msg) = &state.status_message {
        spans.push(Span::styled(format!("  {}", msg), Styles::warning()));
    }

    if let Some(err) = &page.last_error {
        spans.push(Span::styled(format!("  ERR: {}", err), Styles::critical()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::default());
    frame.render_widget(paragraph, area);
}
