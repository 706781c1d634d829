//! Column descriptors for the recent-transactions table.
//!
//! The column list depends only on whether the cluster is a tenant, so it is
//! derived once per tenant flag and shared through [`ColumnsMemo`]. Which of
//! those columns are shown depends on the user's selection and is decided by
//! [`is_selected_column`] on every render.

use std::sync::Arc;

use tracing::debug;

use crate::fmt;
use crate::model::RecentTransaction;

/// Metadata for one displayable column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// `Some(false)` hides the column when the user has made no selection.
    pub show_by_default: Option<bool>,
    /// Preferred terminal width. `0` fills remaining space.
    pub width: u16,
    pub cell: fn(&RecentTransaction) -> String,
}

impl PartialEq for ColumnDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.show_by_default == other.show_by_default
            && self.width == other.width
    }
}

/// One entry of the column selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub is_selected: bool,
}

pub const EXECUTION_ID: &str = "executionID";
pub const MOST_RECENT_STATEMENT: &str = "mostRecentStatement";
pub const STATUS: &str = "status";
pub const START_TIME: &str = "startTime";
pub const ELAPSED_TIME: &str = "elapsedTime";
pub const TIME_SPENT_WAITING: &str = "timeSpentWaiting";
pub const STATEMENT_COUNT: &str = "statementCount";
pub const RETRIES: &str = "retries";
pub const APPLICATION_NAME: &str = "applicationName";

fn execution_id_cell(txn: &RecentTransaction) -> String {
    txn.execution_id.clone()
}

fn statement_cell(txn: &RecentTransaction) -> String {
    if txn.query.is_empty() {
        "-".to_string()
    } else {
        fmt::normalize_query(&txn.query)
    }
}

fn status_cell(txn: &RecentTransaction) -> String {
    txn.status.name().to_string()
}

fn start_time_cell(txn: &RecentTransaction) -> String {
    fmt::format_clock(txn.start)
}

fn elapsed_cell(txn: &RecentTransaction) -> String {
    fmt::format_elapsed(txn.elapsed_secs)
}

fn waiting_cell(txn: &RecentTransaction) -> String {
    txn.time_spent_waiting_secs
        .map(fmt::format_elapsed)
        .unwrap_or_else(|| "-".to_string())
}

fn statement_count_cell(txn: &RecentTransaction) -> String {
    txn.statement_count.to_string()
}

fn retries_cell(txn: &RecentTransaction) -> String {
    txn.retries.to_string()
}

fn application_cell(txn: &RecentTransaction) -> String {
    if txn.application.is_empty() {
        "-".to_string()
    } else {
        txn.application.clone()
    }
}

/// Builds the ordered column list.
///
/// Tenant clusters have no access to contention data, so the
/// time-spent-waiting column is left out for them.
pub fn make_recent_transactions_columns(is_tenant: bool) -> Vec<ColumnDescriptor> {
    let mut columns = vec![
        ColumnDescriptor {
            id: EXECUTION_ID,
            title: "Transaction Execution ID",
            show_by_default: Some(true),
            width: 36,
            cell: execution_id_cell,
        },
        ColumnDescriptor {
            id: MOST_RECENT_STATEMENT,
            title: "Most Recent Statement",
            show_by_default: Some(true),
            width: 0,
            cell: statement_cell,
        },
        ColumnDescriptor {
            id: STATUS,
            title: "Status",
            show_by_default: None,
            width: 9,
            cell: status_cell,
        },
        ColumnDescriptor {
            id: START_TIME,
            title: "Start Time (UTC)",
            show_by_default: None,
            width: 16,
            cell: start_time_cell,
        },
        ColumnDescriptor {
            id: ELAPSED_TIME,
            title: "Elapsed Time",
            show_by_default: None,
            width: 12,
            cell: elapsed_cell,
        },
    ];

    if !is_tenant {
        columns.push(ColumnDescriptor {
            id: TIME_SPENT_WAITING,
            title: "Time Spent Waiting",
            show_by_default: Some(false),
            width: 18,
            cell: waiting_cell,
        });
    }

    columns.extend([
        ColumnDescriptor {
            id: STATEMENT_COUNT,
            title: "Statements",
            show_by_default: None,
            width: 10,
            cell: statement_count_cell,
        },
        ColumnDescriptor {
            id: RETRIES,
            title: "Retries",
            show_by_default: Some(false),
            width: 7,
            cell: retries_cell,
        },
        ColumnDescriptor {
            id: APPLICATION_NAME,
            title: "Application",
            show_by_default: None,
            width: 20,
            cell: application_cell,
        },
    ]);

    columns
}

/// Decides whether a column is shown.
///
/// With no user selection the column's own default applies (unset counts as
/// shown); otherwise the column is shown iff its id was selected.
pub fn is_selected_column(selected: Option<&[String]>, column: &ColumnDescriptor) -> bool {
    match selected {
        None => column.show_by_default != Some(false),
        Some(ids) => ids.iter().any(|id| id == column.id),
    }
}

/// Maps columns to column-selector options, keeping column order.
pub fn get_column_options(
    columns: &[ColumnDescriptor],
    selected: Option<&[String]>,
) -> Vec<SelectOption> {
    columns
        .iter()
        .map(|column| SelectOption {
            label: column.title.to_string(),
            value: column.id.to_string(),
            is_selected: is_selected_column(selected, column),
        })
        .collect()
}

/// Column factory signature.
pub type ColumnFactory = fn(bool) -> Vec<ColumnDescriptor>;

/// Caches the column list keyed on the tenant flag alone.
///
/// While the flag is unchanged, [`ColumnsMemo::get`] hands out the same
/// `Arc`, so consumers comparing by pointer see no change.
#[derive(Debug)]
pub struct ColumnsMemo {
    factory: ColumnFactory,
    last: Option<(bool, Arc<[ColumnDescriptor]>)>,
}

impl Default for ColumnsMemo {
    fn default() -> Self {
        Self::new(make_recent_transactions_columns)
    }
}

impl ColumnsMemo {
    pub fn new(factory: ColumnFactory) -> Self {
        Self {
            factory,
            last: None,
        }
    }

    pub fn get(&mut self, is_tenant: bool) -> Arc<[ColumnDescriptor]> {
        if let Some((key, columns)) = &self.last
            && *key == is_tenant
        {
            return Arc::clone(columns);
        }

        debug!(is_tenant, "recomputing transaction columns");
        let columns: Arc<[ColumnDescriptor]> = (self.factory)(is_tenant).into();
        self.last = Some((is_tenant, Arc::clone(&columns)));
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ids(columns: &[ColumnDescriptor]) -> Vec<&'static str> {
        columns.iter().map(|c| c.id).collect()
    }

    #[test]
    fn tenant_columns_omit_time_spent_waiting() {
        let full = make_recent_transactions_columns(false);
        let tenant = make_recent_transactions_columns(true);
        assert!(ids(&full).contains(&TIME_SPENT_WAITING));
        assert!(!ids(&tenant).contains(&TIME_SPENT_WAITING));
        assert_eq!(full.len(), tenant.len() + 1);
        assert_eq!(full[0].id, EXECUTION_ID);
        assert_eq!(full.last().map(|c| c.id), Some(APPLICATION_NAME));
    }

    #[test]
    fn column_ids_are_unique() {
        let columns = make_recent_transactions_columns(false);
        let mut seen = ids(&columns);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), columns.len());
    }

    #[test]
    fn no_selection_uses_column_defaults() {
        let columns = make_recent_transactions_columns(false);
        let shown: Vec<_> = columns
            .iter()
            .filter(|c| is_selected_column(None, c))
            .map(|c| c.id)
            .collect();
        assert_eq!(
            shown,
            vec![
                EXECUTION_ID,
                MOST_RECENT_STATEMENT,
                STATUS,
                START_TIME,
                ELAPSED_TIME,
                STATEMENT_COUNT,
                APPLICATION_NAME
            ]
        );
    }

    #[test]
    fn selection_shows_exactly_selected_ids() {
        let columns = make_recent_transactions_columns(false);
        let selected = vec![RETRIES.to_string(), STATUS.to_string(), "unknown".to_string()];
        let shown: Vec<_> = columns
            .iter()
            .filter(|c| is_selected_column(Some(&selected), c))
            .map(|c| c.id)
            .collect();
        // Column order, not selection order.
        assert_eq!(shown, vec![STATUS, RETRIES]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let columns = make_recent_transactions_columns(true);
        let selected: Vec<String> = Vec::new();
        assert!(!columns.iter().any(|c| is_selected_column(Some(&selected), c)));
    }

    #[test]
    fn options_mirror_columns() {
        let columns = make_recent_transactions_columns(true);
        let selected = vec![EXECUTION_ID.to_string()];
        let options = get_column_options(&columns, Some(&selected));
        assert_eq!(options.len(), columns.len());
        assert_eq!(options[0].label, "Transaction Execution ID");
        assert_eq!(options[0].value, EXECUTION_ID);
        assert!(options[0].is_selected);
        assert!(options[1..].iter().all(|o| !o.is_selected));
    }

    static FACTORY_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counting_factory(is_tenant: bool) -> Vec<ColumnDescriptor> {
        FACTORY_CALLS.fetch_add(1, Ordering::SeqCst);
        make_recent_transactions_columns(is_tenant)
    }

    #[test]
    fn memo_reuses_list_until_flag_changes() {
        let mut memo = ColumnsMemo::new(counting_factory);
        let before = FACTORY_CALLS.load(Ordering::SeqCst);

        let a = memo.get(false);
        let b = memo.get(false);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(FACTORY_CALLS.load(Ordering::SeqCst) - before, 1);

        let c = memo.get(true);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(FACTORY_CALLS.load(Ordering::SeqCst) - before, 2);

        // Only the last key is remembered.
        let d = memo.get(false);
        assert!(!Arc::ptr_eq(&a, &d));
        assert_eq!(&*a, &*d);
        assert_eq!(FACTORY_CALLS.load(Ordering::SeqCst) - before, 3);
    }

    #[test]
    fn cells_render_placeholders_for_missing_values() {
        let columns = make_recent_transactions_columns(false);
        let txn = RecentTransaction::default();
        let cell = |id: &str| {
            let column = columns.iter().find(|c| c.id == id).unwrap();
            (column.cell)(&txn)
        };
        assert_eq!(cell(MOST_RECENT_STATEMENT), "-");
        assert_eq!(cell(TIME_SPENT_WAITING), "-");
        assert_eq!(cell(APPLICATION_NAME), "-");
        assert_eq!(cell(STATUS), "Executing");
        assert_eq!(cell(STATEMENT_COUNT), "0");
    }
}
