//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::page::ActiveTransactionsPage;
use crate::source::TransactionSource;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Main TUI application.
pub struct App {
    source: Box<dyn TransactionSource>,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new application over `source`, starting from `page`.
    pub fn new(source: Box<dyn TransactionSource>, page: ActiveTransactionsPage) -> Self {
        let source_name = source.describe();
        Self {
            source,
            state: AppState::new(page, source_name),
            should_quit: false,
        }
    }

    /// Runs the main event loop, refreshing every `refresh_interval`.
    pub fn run(mut self, refresh_interval: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(refresh_interval);

        // Initial fetch
        self.refresh();

        let result = self.event_loop(&mut terminal, &events);

        // Restore terminal even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => {
                    if !self.state.paused {
                        self.refresh();
                    }
                }
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Refresh => self.refresh(),
                    KeyAction::None => {}
                },
                Ok(Event::Resize) => {}
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                debug!("quit requested");
                return Ok(());
            }
        }
    }

    fn refresh(&mut self) {
        self.state.page.refresh(self.source.as_mut());
    }
}
