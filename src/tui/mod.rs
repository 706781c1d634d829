//! Terminal User Interface for the recent transactions section.
//!
//! Shows open transactions in a refreshing table, similar to top, with a
//! search box, a column selector and a sort marker driven by the section
//! view model.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, ColumnsSelectorState, InputMode};
