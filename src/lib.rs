//! recent-txns - recent transactions section of a database admin console.
//!
//! The library holds the UI-agnostic section view model and its inputs:
//! - [`section`] derives columns, selector options, statistics and the
//!   empty-state placeholder from caller-owned props
//! - [`page`] owns those props and applies the callbacks the section reports
//! - [`source`] loads transactions from a JSON file or a CockroachDB cluster
//! - [`tui`] and [`print`] draw the view in a terminal or as plain text

pub mod columns;
pub mod filter;
pub mod fmt;
pub mod model;
pub mod page;
pub mod print;
pub mod section;
pub mod source;
pub mod table;
pub mod tui;
pub mod util;
