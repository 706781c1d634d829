//! Help popup widget with keybindings and column descriptions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::style::Styles;

const KEYS: &[(&str, &str)] = &[
    ("↑/↓ j/k", "select row"),
    ("PgUp/PgDn", "move by page"),
    ("Home/End", "first/last row"),
    ("/", "search by statement or execution ID"),
    ("s", "sort by next column"),
    ("r", "reverse sort direction"),
    ("c", "choose columns"),
    ("x", "clear filters"),
    ("p", "pause/resume refresh"),
    ("F5", "refresh now"),
    ("?", "toggle help"),
    ("q", "quit"),
];

const COLUMNS: &[(&str, &str)] = &[
    ("Execution ID", "ID of the open transaction"),
    ("Statement", "most recent statement of the transaction"),
    ("Status", "Executing, Preparing, Waiting or Idle"),
    ("Start Time", "when the transaction began (UTC)"),
    ("Elapsed", "time since the transaction began"),
    ("Waiting", "time spent waiting on locks (not on tenants)"),
    ("Statements", "statements executed so far"),
    ("Retries", "automatic retries of the transaction"),
    ("Application", "application name of the session"),
];

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    // 60% width, 80% height, clamped to 40-80 x 10-30
    let popup_width = (area.width * 60 / 100).clamp(40, 80);
    let popup_height = (area.height * 80 / 100).clamp(10, 30);
    let popup_area = super::popup::centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let content = help_content();
    let content_lines = content.len();

    let block = Block::default()
        .title(" Recent Transactions Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Styles::dim()),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Styles::dim()),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close, ", Styles::dim()),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Styles::dim()),
        Span::styled(scroll_info, Styles::dim()),
    ]));
    frame.render_widget(footer, chunks[1]);
}

fn help_content() -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Keys",
        Style::default().fg(Color::Yellow),
    ))];
    for (key, text) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", key), Styles::help_key()),
            Span::raw(*text),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Columns",
        Style::default().fg(Color::Yellow),
    )));
    for (name, text) in COLUMNS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", name), Styles::accent()),
            Span::raw(*text),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Rows keep the order of the source; sorting only marks the header.",
        Styles::dim(),
    )));
    lines
}
