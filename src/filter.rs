//! Filter state for the recent-transactions view.
//!
//! The section only needs [`calculate_active_filters`]. The page owning the
//! section narrows the transaction list with [`filter_recent_transactions`]
//! before handing it down.

use crate::model::{ExecutionStatus, RecentTransaction};

/// Prefix of application names used by the cluster itself.
pub const INTERNAL_APP_NAME_PREFIX: &str = "$ internal";

/// Filter label matching transactions with an empty application name.
pub const UNSET_APP_NAME: &str = "(unset)";

/// Unit of a [`TimeRange`] threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    Milliseconds,
    #[default]
    Seconds,
    Minutes,
}

impl TimeUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
        }
    }

    fn as_secs(&self, number: u64) -> f64 {
        match self {
            TimeUnit::Milliseconds => number as f64 / 1000.0,
            TimeUnit::Seconds => number as f64,
            TimeUnit::Minutes => number as f64 * 60.0,
        }
    }
}

/// "Elapsed longer than" threshold. Zero means no threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    pub number: u64,
    pub unit: TimeUnit,
}

impl TimeRange {
    pub fn new(number: u64, unit: TimeUnit) -> Self {
        Self { number, unit }
    }

    /// The unit alone does not constrain anything.
    pub fn is_active(&self) -> bool {
        self.number != 0
    }

    pub fn as_secs(&self) -> f64 {
        self.unit.as_secs(self.number)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.unit.suffix())
    }
}

/// Filter dimensions of the recent-transactions view.
///
/// `Default` is the inactive value of every dimension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecentTransactionFilters {
    /// Application labels, see [`INTERNAL_APP_NAME_PREFIX`] and [`UNSET_APP_NAME`].
    pub app_names: Vec<String>,
    pub execution_statuses: Vec<ExecutionStatus>,
    pub time_range: TimeRange,
}

/// Counts the filter dimensions that differ from their default.
pub fn calculate_active_filters(filters: &RecentTransactionFilters) -> usize {
    [
        !filters.app_names.is_empty(),
        !filters.execution_statuses.is_empty(),
        filters.time_range.is_active(),
    ]
    .into_iter()
    .filter(|&active| active)
    .count()
}

/// Returns the filter label an application name falls under.
pub fn app_label(application: &str) -> &str {
    if application.is_empty() {
        UNSET_APP_NAME
    } else if application.starts_with(INTERNAL_APP_NAME_PREFIX) {
        INTERNAL_APP_NAME_PREFIX
    } else {
        application
    }
}

fn matches_search(txn: &RecentTransaction, search_lower: &str) -> bool {
    search_lower.is_empty()
        || txn.query.to_lowercase().contains(search_lower)
        || txn.execution_id.to_lowercase().starts_with(search_lower)
}

/// Applies filters and search to a transaction list, keeping order.
pub fn filter_recent_transactions(
    transactions: &[RecentTransaction],
    filters: &RecentTransactionFilters,
    search: &str,
) -> Vec<RecentTransaction> {
    let search_lower = search.trim().to_lowercase();
    let min_elapsed = filters.time_range.as_secs();

    transactions
        .iter()
        .filter(|txn| {
            filters.app_names.is_empty()
                || filters
                    .app_names
                    .iter()
                    .any(|name| name == app_label(&txn.application))
        })
        .filter(|txn| {
            filters.execution_statuses.is_empty()
                || filters.execution_statuses.contains(&txn.status)
        })
        .filter(|txn| !filters.time_range.is_active() || txn.elapsed_secs > min_elapsed)
        .filter(|txn| matches_search(txn, &search_lower))
        .cloned()
        .collect()
}

/// Sorted, de-duplicated application labels of a transaction list.
pub fn application_names(transactions: &[RecentTransaction]) -> Vec<String> {
    let mut names: Vec<String> = transactions
        .iter()
        .map(|txn| app_label(&txn.application).to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(id: &str, app: &str, status: ExecutionStatus, elapsed: f64, query: &str) -> RecentTransaction {
        RecentTransaction {
            execution_id: id.to_string(),
            application: app.to_string(),
            status,
            elapsed_secs: elapsed,
            query: query.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<RecentTransaction> {
        vec![
            txn("aa01", "movr", ExecutionStatus::Executing, 0.5, "SELECT * FROM rides"),
            txn("bb02", "", ExecutionStatus::Idle, 12.0, "UPDATE users SET name = $1"),
            txn("cc03", "$ internal-gc", ExecutionStatus::Waiting, 90.0, "DELETE FROM system.jobs"),
            txn("dd04", "movr", ExecutionStatus::Preparing, 3.0, ""),
        ]
    }

    fn ids(txns: &[RecentTransaction]) -> Vec<&str> {
        txns.iter().map(|t| t.execution_id.as_str()).collect()
    }

    #[test]
    fn default_filters_are_inactive() {
        let filters = RecentTransactionFilters::default();
        assert_eq!(calculate_active_filters(&filters), 0);
    }

    #[test]
    fn one_app_name_is_one_active_filter() {
        let filters = RecentTransactionFilters {
            app_names: vec!["app1".to_string()],
            ..Default::default()
        };
        assert_eq!(calculate_active_filters(&filters), 1);
    }

    #[test]
    fn every_dimension_counts_once() {
        let filters = RecentTransactionFilters {
            app_names: vec!["a".to_string(), "b".to_string()],
            execution_statuses: vec![ExecutionStatus::Idle],
            time_range: TimeRange::new(5, TimeUnit::Seconds),
        };
        assert_eq!(calculate_active_filters(&filters), 3);
    }

    #[test]
    fn time_unit_alone_is_not_active() {
        let filters = RecentTransactionFilters {
            time_range: TimeRange::new(0, TimeUnit::Minutes),
            ..Default::default()
        };
        assert_eq!(calculate_active_filters(&filters), 0);
    }

    #[test]
    fn no_filters_keep_everything_in_order() {
        let txns = sample();
        let out = filter_recent_transactions(&txns, &RecentTransactionFilters::default(), "");
        assert_eq!(ids(&out), vec!["aa01", "bb02", "cc03", "dd04"]);
    }

    #[test]
    fn app_filter_folds_internal_and_unset() {
        let txns = sample();
        let filters = RecentTransactionFilters {
            app_names: vec![INTERNAL_APP_NAME_PREFIX.to_string(), UNSET_APP_NAME.to_string()],
            ..Default::default()
        };
        let out = filter_recent_transactions(&txns, &filters, "");
        assert_eq!(ids(&out), vec!["bb02", "cc03"]);
    }

    #[test]
    fn status_and_time_range_filters() {
        let txns = sample();
        let filters = RecentTransactionFilters {
            execution_statuses: vec![ExecutionStatus::Idle, ExecutionStatus::Waiting],
            time_range: TimeRange::new(1, TimeUnit::Minutes),
            ..Default::default()
        };
        let out = filter_recent_transactions(&txns, &filters, "");
        assert_eq!(ids(&out), vec!["cc03"]);
    }

    #[test]
    fn millisecond_threshold() {
        let txns = sample();
        let filters = RecentTransactionFilters {
            time_range: TimeRange::new(600, TimeUnit::Milliseconds),
            ..Default::default()
        };
        let out = filter_recent_transactions(&txns, &filters, "");
        assert_eq!(ids(&out), vec!["bb02", "cc03", "dd04"]);
    }

    #[test]
    fn search_matches_query_or_execution_id_prefix() {
        let txns = sample();
        let none = RecentTransactionFilters::default();
        assert_eq!(ids(&filter_recent_transactions(&txns, &none, "select")), vec!["aa01"]);
        assert_eq!(ids(&filter_recent_transactions(&txns, &none, "DD")), vec!["dd04"]);
        assert!(filter_recent_transactions(&txns, &none, "04").is_empty());
    }

    #[test]
    fn application_names_are_sorted_and_folded() {
        let txns = sample();
        assert_eq!(
            application_names(&txns),
            vec![
                INTERNAL_APP_NAME_PREFIX.to_string(),
                UNSET_APP_NAME.to_string(),
                "movr".to_string()
            ]
        );
    }
}
