//! Transaction records shown by the recent-transactions view.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Execution status of an open transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// A statement is running.
    #[default]
    Executing,
    /// A statement is being planned.
    Preparing,
    /// Blocked on a lock held by another transaction.
    Waiting,
    /// Open transaction with no statement in flight.
    Idle,
}

impl ExecutionStatus {
    pub fn all() -> &'static [ExecutionStatus] {
        &[
            ExecutionStatus::Executing,
            ExecutionStatus::Preparing,
            ExecutionStatus::Waiting,
            ExecutionStatus::Idle,
        ]
    }

    /// Returns the display name of the status.
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionStatus::Executing => "Executing",
            ExecutionStatus::Preparing => "Preparing",
            ExecutionStatus::Waiting => "Waiting",
            ExecutionStatus::Idle => "Idle",
        }
    }

    /// Parses a status name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        ExecutionStatus::all()
            .iter()
            .copied()
            .find(|status| status.name().to_lowercase() == lower)
    }

    /// Maps a `crdb_internal.cluster_queries` phase to a status.
    ///
    /// A transaction without an in-flight statement is idle; unknown phases
    /// of an in-flight statement count as executing.
    pub fn from_phase(phase: Option<&str>) -> Self {
        match phase.map(|p| p.trim().to_lowercase()) {
            None => ExecutionStatus::Idle,
            Some(p) if p.is_empty() => ExecutionStatus::Idle,
            Some(p) if p == "preparing" => ExecutionStatus::Preparing,
            Some(p) if p == "waiting" => ExecutionStatus::Waiting,
            Some(_) => ExecutionStatus::Executing,
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which transactions page a placeholder belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionViewType {
    /// Transactions currently open on the cluster.
    Active,
}

/// One transaction currently open on the cluster.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecentTransaction {
    pub execution_id: String,
    pub session_id: String,
    /// Transaction start, seconds since epoch.
    pub start: i64,
    pub elapsed_secs: f64,
    pub application: String,
    /// Most recent statement text.
    pub query: String,
    pub statement_id: Option<String>,
    pub status: ExecutionStatus,
    pub statement_count: u64,
    pub retries: u64,
    pub time_spent_waiting_secs: Option<f64>,
}

impl RecentTransaction {
    /// Stable row identifier derived from the execution ID.
    pub fn row_id(&self) -> u64 {
        xxh3_64(self.execution_id.as_bytes())
    }
}
