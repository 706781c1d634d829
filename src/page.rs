//! Active-transactions page: owns the state the section reads and applies
//! the changes the section reports.

use tracing::{info, warn};

use crate::filter::{RecentTransactionFilters, filter_recent_transactions};
use crate::model::RecentTransaction;
use crate::section::{RecentTransactionsProps, SectionCallbacks};
use crate::source::TransactionSource;
use crate::table::{Pagination, SortSetting};

#[derive(Debug, Default)]
pub struct ActiveTransactionsPage {
    pub filters: RecentTransactionFilters,
    pub search: String,
    pub sort_setting: SortSetting,
    pub pagination: Pagination,
    pub selected_columns: Option<Vec<String>>,
    pub is_tenant: Option<bool>,
    /// Last fetched list, before filters and search.
    transactions: Vec<RecentTransaction>,
    /// Filtered view of `transactions`, rebuilt when an input changes.
    visible: Vec<RecentTransaction>,
    /// Message of the last failed refresh; cleared by a successful one.
    pub last_error: Option<String>,
    /// Unix time of the last successful refresh.
    pub last_refresh: Option<i64>,
}

impl ActiveTransactionsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transactions of the last refresh.
    pub fn transactions(&self) -> &[RecentTransaction] {
        &self.transactions
    }

    /// Transactions left after filters and search.
    pub fn visible(&self) -> &[RecentTransaction] {
        &self.visible
    }

    /// Replaces the transaction list.
    pub fn set_transactions(&mut self, transactions: Vec<RecentTransaction>) {
        self.transactions = transactions;
        self.apply_filters();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.apply_filters();
    }

    pub fn set_filters(&mut self, filters: RecentTransactionFilters) {
        self.filters = filters;
        self.apply_filters();
    }

    fn apply_filters(&mut self) {
        self.visible = filter_recent_transactions(&self.transactions, &self.filters, &self.search);
    }

    /// Fetches a new transaction list. On failure the previous list is kept
    /// and the error recorded.
    pub fn refresh(&mut self, source: &mut dyn TransactionSource) {
        match source.fetch() {
            Ok(transactions) => {
                info!(
                    "{}: {} open transactions",
                    source.describe(),
                    transactions.len()
                );
                self.last_error = None;
                self.last_refresh = Some(chrono::Utc::now().timestamp());
                self.set_transactions(transactions);
            }
            Err(e) => {
                warn!("{}: {}", source.describe(), e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Props for the recent-transactions section.
    pub fn props(&self) -> RecentTransactionsProps<'_> {
        RecentTransactionsProps {
            filters: &self.filters,
            is_tenant: self.is_tenant,
            pagination: self.pagination,
            search: &self.search,
            transactions: &self.visible,
            selected_columns: self.selected_columns.as_deref(),
            sort_setting: &self.sort_setting,
        }
    }
}

impl SectionCallbacks for ActiveTransactionsPage {
    fn on_change_sort_setting(&mut self, setting: SortSetting) {
        self.sort_setting = setting;
    }

    fn on_clear_filters(&mut self) {
        self.set_filters(RecentTransactionFilters::default());
    }

    fn on_columns_select(&mut self, columns: Vec<String>) {
        self.selected_columns = Some(columns);
    }
}
