//! JSON file source.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{SourceError, TransactionSource};
use crate::model::RecentTransaction;

/// Reads a JSON array of transactions, re-reading the file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionSource for FileSource {
    fn fetch(&mut self) -> Result<Vec<RecentTransaction>, SourceError> {
        let data = fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Io(format!("{}: {}", self.path.display(), e)))?;
        let transactions: Vec<RecentTransaction> = serde_json::from_str(&data)?;
        debug!(path = %self.path.display(), count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
