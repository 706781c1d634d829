//! Statistics line above the table, with the clear-filters and column
//! selector hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::print::statistics_line;
use crate::section::RecentTransactionsView;
use crate::tui::style::Styles;

pub fn render_table_statistics(frame: &mut Frame, area: Rect, view: &RecentTransactionsView<'_>) {
    let shown = view.table.columns.len();
    let total = view.columns_selector.options.len();

    let mut spans = vec![
        Span::raw(format!(" {}", statistics_line(&view.statistics))),
        Span::styled("  ", Styles::dim()),
    ];
    if view.statistics.active_filters > 0 {
        spans.push(Span::styled("x", Styles::help_key()));
        spans.push(Span::styled(" clear filters  ", Styles::dim()));
    }
    spans.push(Span::styled("c", Styles::help_key()));
    spans.push(Span::styled(format!(" columns {}/{}", shown, total), Styles::dim()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
