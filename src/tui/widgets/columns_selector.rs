//! Column selector popup.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::columns::SelectOption;
use crate::tui::state::ColumnsSelectorState;
use crate::tui::style::Styles;

/// Renders the checkbox list of columns with the pending choices.
pub fn render_columns_selector(
    frame: &mut Frame,
    area: Rect,
    options: &[SelectOption],
    selector: &ColumnsSelectorState,
) {
    let width = options
        .iter()
        .map(|o| o.label.chars().count() as u16 + 10)
        .max()
        .unwrap_or(0)
        .max(36);
    // Options + border + footer
    let height = options.len() as u16 + 3;
    let popup_area = super::popup::centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Columns ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Styles::default());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let lines: Vec<Line> = options
        .iter()
        .zip(&selector.checked)
        .enumerate()
        .map(|(i, (option, &checked))| {
            let mark = if checked { "[x]" } else { "[ ]" };
            let text = format!(" {} {}", mark, option.label);
            if i == selector.cursor {
                Line::from(Span::styled(text, Styles::selected()))
            } else {
                Line::from(text)
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let footer = Line::from(vec![
        Span::styled("Space", Styles::help_key()),
        Span::styled(" toggle  ", Styles::dim()),
        Span::styled("Enter", Styles::help_key()),
        Span::styled(" apply  ", Styles::dim()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" cancel", Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}
