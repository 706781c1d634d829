//! Plain-text rendering of a section view, for `--print` mode.

use crate::fmt;
use crate::section::{RecentTransactionsView, TableStatisticsView};

/// Width used for the fill column in plain text.
const FILL_WIDTH: usize = 60;

/// Statistics line, e.g. `3 transactions | page 1 | 1 active filter`.
pub fn statistics_line(stats: &TableStatisticsView<'_>) -> String {
    let mut line = if stats.search.is_empty() {
        format!("{} {}", stats.total_count, stats.array_item_name)
    } else {
        format!("{} results for \"{}\"", stats.total_count, stats.search)
    };
    line.push_str(&format!(" | page {}", stats.pagination.current));
    match stats.active_filters {
        0 => {}
        1 => line.push_str(" | 1 active filter"),
        n => line.push_str(&format!(" | {} active filters", n)),
    }
    line
}

/// Renders the view as text: statistics, header, one line per row.
pub fn render_plain(view: &RecentTransactionsView<'_>) -> String {
    let mut out = statistics_line(&view.statistics);
    out.push('\n');

    let table = &view.table;
    let widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| {
            if c.width == 0 {
                FILL_WIDTH
            } else {
                (c.width as usize).max(c.title.chars().count())
            }
        })
        .collect();
    let sort_index = table.sort_column_index();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .enumerate()
        .map(|(i, (c, &w))| {
            let indicator = match sort_index {
                Some(s) if s == i => {
                    if table.sort_setting.ascending { "▲" } else { "▼" }
                }
                _ => "",
            };
            format!("{:<w$}", format!("{}{}", c.title, indicator), w = w)
        })
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    if table.data.is_empty() {
        out.push_str(table.no_result.title());
        out.push('\n');
        out.push_str(table.no_result.message());
        out.push('\n');
        return out;
    }

    for txn in table.data {
        let cells: Vec<String> = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{:<w$}", fmt::truncate(&(c.cell)(txn), w), w = w))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}
