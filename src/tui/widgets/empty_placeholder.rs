//! Placeholder shown inside the table block when there are no rows.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::section::EmptyTransactionsPlaceholder;
use crate::tui::style::Styles;

pub fn render_empty_placeholder(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    placeholder: &EmptyTransactionsPlaceholder,
) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(placeholder.title(), Styles::help_key())),
        Line::from(Span::styled(placeholder.message(), Styles::dim())),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
