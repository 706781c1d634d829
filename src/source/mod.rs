//! Sources of recent-transaction lists.
//!
//! The page refreshes through the `TransactionSource` trait, so the TUI
//! works the same with a live cluster or a recorded JSON file.

mod cockroach;
mod file;

pub use cockroach::{CockroachSource, TlsMode};
pub use file::FileSource;

use crate::model::RecentTransaction;

/// Errors raised while fetching transactions.
#[derive(Debug)]
pub enum SourceError {
    /// I/O error while reading a file.
    Io(String),
    /// Malformed input data.
    Parse(String),
    /// Could not connect to the cluster.
    Connection(String),
    /// Query execution failed.
    Query(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io(msg) => write!(f, "I/O error: {}", msg),
            SourceError::Parse(msg) => write!(f, "parse error: {}", msg),
            SourceError::Connection(msg) => write!(f, "connection error: {}", msg),
            SourceError::Query(msg) => write!(f, "query error: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}

/// A source of the transactions currently open on a cluster.
pub trait TransactionSource {
    /// Fetches the current list of open transactions.
    fn fetch(&mut self) -> Result<Vec<RecentTransaction>, SourceError>;

    /// Short human-readable name of the source, for logs and the header.
    fn describe(&self) -> String;
}
