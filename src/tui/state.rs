//! Application state management.

use ratatui::widgets::TableState as RatatuiTableState;

use crate::columns::SelectOption;
use crate::page::ActiveTransactionsPage;
use crate::section::{RecentTransactionsSection, RecentTransactionsView, SectionAction};
use crate::table::TableSelection;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box.
    Search,
    /// Column selector popup is open.
    ColumnSelect,
}

/// Pending choices of the column selector popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnsSelectorState {
    pub cursor: usize,
    /// One flag per option, in option order.
    pub checked: Vec<bool>,
}

impl ColumnsSelectorState {
    /// Starts from the current selection.
    pub fn open(options: &[SelectOption]) -> Self {
        Self {
            cursor: 0,
            checked: options.iter().map(|o| o.is_selected).collect(),
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.checked.len() {
            self.cursor += 1;
        }
    }

    pub fn toggle(&mut self) {
        if let Some(flag) = self.checked.get_mut(self.cursor) {
            *flag = !*flag;
        }
    }

    /// Checked option values, in option order.
    pub fn selected_ids(&self, options: &[SelectOption]) -> Vec<String> {
        options
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(option, _)| option.value.clone())
            .collect()
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub page: ActiveTransactionsPage,
    pub section: RecentTransactionsSection,
    pub selection: TableSelection,
    pub ratatui_state: RatatuiTableState,
    pub input_mode: InputMode,
    pub columns_selector: Option<ColumnsSelectorState>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub show_quit_confirm: bool,
    /// Periodic refresh suspended.
    pub paused: bool,
    /// Name of the transaction source, for the header.
    pub source_name: String,
    /// One-shot message shown in the header until the next key press.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(page: ActiveTransactionsPage, source_name: impl Into<String>) -> Self {
        Self {
            page,
            section: RecentTransactionsSection::new(),
            selection: TableSelection::default(),
            ratatui_state: RatatuiTableState::default(),
            input_mode: InputMode::Normal,
            columns_selector: None,
            show_help: false,
            help_scroll: 0,
            show_quit_confirm: false,
            paused: false,
            source_name: source_name.into(),
            status_message: None,
        }
    }

    /// Renders the section against the current page state and lets `f`
    /// pick an interaction from the resulting view.
    pub fn with_view<R>(&mut self, f: impl FnOnce(&RecentTransactionsView<'_>) -> R) -> R {
        let props = self.page.props();
        let view = self.section.render(&props);
        f(&view)
    }

    /// Hands a section interaction to the page.
    pub fn dispatch(&mut self, action: SectionAction) {
        action.dispatch(&mut self.page);
    }

    /// Returns true if any popup is open.
    pub fn any_popup_open(&self) -> bool {
        self.show_help || self.show_quit_confirm || self.columns_selector.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SelectOption> {
        ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, v)| SelectOption {
                label: v.to_uppercase(),
                value: v.to_string(),
                is_selected: i != 1,
            })
            .collect()
    }

    #[test]
    fn selector_starts_from_current_selection() {
        let opts = options();
        let sel = ColumnsSelectorState::open(&opts);
        assert_eq!(sel.checked, vec![true, false, true]);
        assert_eq!(sel.selected_ids(&opts), vec!["a", "c"]);
    }

    #[test]
    fn selector_toggle_and_cursor_bounds() {
        let opts = options();
        let mut sel = ColumnsSelectorState::open(&opts);
        sel.move_up();
        assert_eq!(sel.cursor, 0);
        sel.toggle();
        sel.move_down();
        sel.toggle();
        sel.move_down();
        sel.move_down();
        assert_eq!(sel.cursor, 2);
        assert_eq!(sel.selected_ids(&opts), vec!["b", "c"]);
    }
}
