//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, ColumnsSelectorState, InputMode};

/// Rows moved by PageUp/PageDown.
const PAGE_STEP: usize = 10;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Fetch transactions now.
    Refresh,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Search => handle_search_mode(state, key),
        InputMode::ColumnSelect => handle_column_select_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
            KeyAction::None
        }

        KeyCode::Char('?') | KeyCode::Char('h') => {
            state.show_help = !state.show_help;
            state.help_scroll = 0;
            KeyAction::None
        }
        KeyCode::Esc => {
            state.show_help = false;
            KeyAction::None
        }

        // Row navigation (or help scroll if help is open)
        KeyCode::Up | KeyCode::Char('k') => {
            if state.show_help {
                state.help_scroll = state.help_scroll.saturating_sub(1);
            } else {
                state.selection.select_up();
            }
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.show_help {
                state.help_scroll = state.help_scroll.saturating_add(1);
            } else {
                // Clamped during render
                state.selection.select_down();
            }
            KeyAction::None
        }
        KeyCode::PageUp => {
            state.selection.page_up(PAGE_STEP);
            KeyAction::None
        }
        KeyCode::PageDown => {
            state.selection.page_down(PAGE_STEP);
            KeyAction::None
        }
        KeyCode::Home => {
            state.selection.home();
            KeyAction::None
        }
        KeyCode::End => {
            state.selection.end();
            KeyAction::None
        }

        _ if state.any_popup_open() => KeyAction::None,

        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            KeyAction::None
        }
        KeyCode::Char('c') => {
            let options = state.with_view(|view| view.columns_selector.options.clone());
            state.columns_selector = Some(ColumnsSelectorState::open(&options));
            state.input_mode = InputMode::ColumnSelect;
            KeyAction::None
        }
        KeyCode::Char('s') => {
            match state.with_view(|view| view.table.next_sort_column()) {
                Some(action) => state.dispatch(action),
                None => state.status_message = Some("No columns to sort by".to_string()),
            }
            KeyAction::None
        }
        KeyCode::Char('r') => {
            let action = state.with_view(|view| {
                view.table
                    .change_sort_setting(view.table.sort_setting.toggled())
            });
            state.dispatch(action);
            KeyAction::None
        }
        KeyCode::Char('x') => {
            let action = state.with_view(|view| {
                (view.statistics.active_filters > 0).then(|| view.statistics.clear_filters())
            });
            match action {
                Some(action) => state.dispatch(action),
                None => state.status_message = Some("No active filters".to_string()),
            }
            KeyAction::None
        }
        KeyCode::Char('p') => {
            state.paused = !state.paused;
            KeyAction::None
        }
        KeyCode::F(5) => KeyAction::Refresh,
        _ => KeyAction::None,
    }
}

/// Handles keys while typing a search.
fn handle_search_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        // Ignore control/alt-modified chars
        KeyCode::Char(_)
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            KeyAction::None
        }
        KeyCode::Esc => {
            // Cancel search
            state.input_mode = InputMode::Normal;
            state.page.set_search("");
            KeyAction::None
        }
        KeyCode::Enter => {
            // Search is applied while typing
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Backspace => {
            let mut search = state.page.search.clone();
            search.pop();
            state.page.set_search(search);
            KeyAction::None
        }
        KeyCode::Char(c) => {
            let mut search = state.page.search.clone();
            search.push(c);
            state.page.set_search(search);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in the column selector popup.
fn handle_column_select_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let Some(selector) = state.columns_selector.as_mut() else {
        state.input_mode = InputMode::Normal;
        return KeyAction::None;
    };

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => selector.move_up(),
        KeyCode::Down | KeyCode::Char('j') => selector.move_down(),
        KeyCode::Char(' ') => selector.toggle(),
        KeyCode::Enter => {
            let selector = state.columns_selector.take();
            state.input_mode = InputMode::Normal;
            if let Some(selector) = selector {
                let action = state.with_view(|view| {
                    let ids = selector.selected_ids(&view.columns_selector.options);
                    view.columns_selector.submit(ids)
                });
                state.dispatch(action);
            }
        }
        KeyCode::Esc => {
            state.columns_selector = None;
            state.input_mode = InputMode::Normal;
        }
        _ => {}
    }
    KeyAction::None
}
