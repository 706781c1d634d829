//! TUI widgets for the recent-transactions viewer.

mod columns_selector;
mod empty_placeholder;
mod header;
mod help;
mod popup;
mod quit_confirm;
mod sorted_table;
mod table_statistics;

pub use columns_selector::render_columns_selector;
pub use empty_placeholder::render_empty_placeholder;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use sorted_table::render_sorted_table;
pub use table_statistics::render_table_statistics;
