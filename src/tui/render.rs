//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::AppState;
use super::widgets::{
    render_columns_selector, render_header, render_help, render_quit_confirm,
    render_sorted_table, render_table_statistics,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Statistics
        Constraint::Min(3),    // Table
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    let props = state.page.props();
    let view = state.section.render(&props);

    render_table_statistics(frame, chunks[1], &view);
    render_sorted_table(
        frame,
        chunks[2],
        &view.table,
        &mut state.selection,
        &mut state.ratatui_state,
    );

    if let Some(selector) = &state.columns_selector {
        render_columns_selector(frame, area, &view.columns_selector.options, selector);
    }

    // Popups rendered last to overlay everything
    if state.show_help {
        render_help(frame, area, &mut state.help_scroll);
    }

    if state.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}
