//! Quit confirmation popup.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_area = super::popup::centered_rect(34, 5, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Quit? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Styles::default());

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled("/", Styles::dim()),
            Span::styled("q", Styles::help_key()),
            Span::raw(" quit  "),
            Span::styled("Esc", Styles::help_key()),
            Span::styled("/", Styles::dim()),
            Span::styled("n", Styles::help_key()),
            Span::raw(" stay"),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, popup_area);
}
