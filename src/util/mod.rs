//! Utility modules for recent-txns.

mod duration_parser;

pub use duration_parser::{DurationParseError, parse_duration};
