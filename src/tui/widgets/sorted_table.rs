//! Recent transactions table.
//! Rows are drawn in the order they were supplied; the sort setting only
//! decides which header carries the direction marker.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState};

use crate::section::SortedTableView;
use crate::table::TableSelection;
use crate::tui::style::Styles;

use super::render_empty_placeholder;

/// Renders the sortable table, or the placeholder when it has no rows.
pub fn render_sorted_table(
    frame: &mut Frame,
    area: Rect,
    table: &SortedTableView<'_>,
    selection: &mut TableSelection,
    ratatui_state: &mut TableState,
) {
    let block = Block::default()
        .title(table_title(table))
        .borders(Borders::ALL)
        .style(Styles::default());

    frame.render_widget(Clear, area);

    if table.data.is_empty() {
        selection.resolve(&[]);
        ratatui_state.select(None);
        render_empty_placeholder(frame, area, block, &table.no_result);
        return;
    }

    if table.columns.is_empty() {
        let paragraph = Paragraph::new("No columns selected, press c to choose columns")
            .block(block)
            .style(Styles::dim());
        frame.render_widget(paragraph, area);
        return;
    }

    // Keep the selected transaction under the cursor across refreshes
    let row_ids: Vec<u64> = table.data.iter().map(|t| t.row_id()).collect();
    selection.resolve(&row_ids);
    ratatui_state.select(Some(selection.selected));

    let sort_index = table.sort_column_index();
    let headers: Vec<Span> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let indicator = if Some(i) == sort_index {
                if table.sort_setting.ascending { "▲" } else { "▼" }
            } else {
                ""
            };
            Span::styled(format!("{}{}", c.title, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = table
        .data
        .iter()
        .map(|txn| {
            let cells: Vec<String> = table.columns.iter().map(|c| (c.cell)(txn)).collect();
            Row::new(cells).style(Styles::status(txn.status)).height(1)
        })
        .collect();

    let widths: Vec<Constraint> = table
        .columns
        .iter()
        .map(|c| {
            if c.width == 0 {
                Constraint::Fill(1)
            } else {
                Constraint::Length(c.width.max(c.title.chars().count() as u16 + 1))
            }
        })
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Styles::selected());

    frame.render_stateful_widget(widget, area, ratatui_state);
}

fn table_title(table: &SortedTableView<'_>) -> String {
    let sort_title = table
        .columns
        .iter()
        .find(|c| c.id == table.sort_setting.column_title)
        .map(|c| c.title)
        .unwrap_or(table.sort_setting.column_title.as_str());
    let direction = if table.sort_setting.ascending { "▲" } else { "▼" };
    format!(
        " Recent Transactions [sort: {} {}] [page {}] ",
        sort_title, direction, table.pagination.current
    )
}
