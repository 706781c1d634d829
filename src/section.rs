//! Recent-transactions section.
//!
//! Composes the column selector, the statistics banner and the table over
//! data owned by the caller. The section derives a handful of values from
//! its props and forwards user interactions back through
//! [`SectionCallbacks`]; it never mutates its inputs.
//!
//! The TUI maps a [`RecentTransactionsView`] to ratatui widgets, and
//! [`crate::print`] maps it to plain text.

use std::sync::Arc;

use tracing::debug;

use crate::columns::{
    ColumnDescriptor, ColumnsMemo, SelectOption, get_column_options, is_selected_column,
};
use crate::filter::{RecentTransactionFilters, calculate_active_filters};
use crate::model::{RecentTransaction, TransactionViewType};
use crate::table::{Pagination, SortSetting};

/// Item name used by the statistics banner.
pub const ARRAY_ITEM_NAME: &str = "transactions";

/// Inputs of the section, all owned by the caller.
#[derive(Debug, Clone, Copy)]
pub struct RecentTransactionsProps<'a> {
    pub filters: &'a RecentTransactionFilters,
    /// Absent means not a tenant.
    pub is_tenant: Option<bool>,
    pub pagination: Pagination,
    /// Empty means no search.
    pub search: &'a str,
    pub transactions: &'a [RecentTransaction],
    /// Absent means per-column defaults.
    pub selected_columns: Option<&'a [String]>,
    pub sort_setting: &'a SortSetting,
}

/// Interactions the section reports to its owner.
pub trait SectionCallbacks {
    fn on_change_sort_setting(&mut self, setting: SortSetting);
    fn on_clear_filters(&mut self);
    fn on_columns_select(&mut self, columns: Vec<String>);
}

/// An interaction emitted by one of the section's child widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionAction {
    ChangeSortSetting(SortSetting),
    ClearFilters,
    ColumnsSelect(Vec<String>),
}

impl SectionAction {
    /// Forwards the action to the matching callback, unmodified.
    pub fn dispatch(self, callbacks: &mut dyn SectionCallbacks) {
        debug!(action = ?self, "section action");
        match self {
            SectionAction::ChangeSortSetting(setting) => callbacks.on_change_sort_setting(setting),
            SectionAction::ClearFilters => callbacks.on_clear_filters(),
            SectionAction::ColumnsSelect(columns) => callbacks.on_columns_select(columns),
        }
    }
}

/// Column selector input.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnsSelectorView {
    pub options: Vec<SelectOption>,
}

impl ColumnsSelectorView {
    /// Submit handler: reports the new selection as-is.
    pub fn submit(&self, columns: Vec<String>) -> SectionAction {
        SectionAction::ColumnsSelect(columns)
    }
}

/// Statistics banner input.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStatisticsView<'a> {
    pub pagination: Pagination,
    pub search: &'a str,
    pub total_count: usize,
    pub array_item_name: &'static str,
    pub active_filters: usize,
}

impl TableStatisticsView<'_> {
    /// Clear-filters handler.
    pub fn clear_filters(&self) -> SectionAction {
        SectionAction::ClearFilters
    }
}

/// Placeholder shown in place of rows when the table has no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTransactionsPlaceholder {
    /// Emptiness is caused by a search or filter.
    pub is_empty_search_results: bool,
    pub transaction_view: TransactionViewType,
}

impl EmptyTransactionsPlaceholder {
    pub fn title(&self) -> &'static str {
        if self.is_empty_search_results {
            return "No transactions match your search.";
        }
        match self.transaction_view {
            TransactionViewType::Active => "No active SQL transactions",
        }
    }

    pub fn message(&self) -> &'static str {
        if self.is_empty_search_results {
            return "Try a different search term or clear the filters.";
        }
        match self.transaction_view {
            TransactionViewType::Active => {
                "Transactions that are open on the cluster will show up here."
            }
        }
    }
}

/// Sortable table input.
#[derive(Debug, Clone)]
pub struct SortedTableView<'a> {
    pub data: &'a [RecentTransaction],
    pub columns: Vec<ColumnDescriptor>,
    pub sort_setting: &'a SortSetting,
    pub pagination: Pagination,
    pub no_result: EmptyTransactionsPlaceholder,
}

impl SortedTableView<'_> {
    /// Sort-change handler: reports the new setting as-is.
    pub fn change_sort_setting(&self, setting: SortSetting) -> SectionAction {
        SectionAction::ChangeSortSetting(setting)
    }

    /// Sort on the shown column after the current one, wrapping around.
    pub fn next_sort_column(&self) -> Option<SectionAction> {
        let pos = self
            .columns
            .iter()
            .position(|c| c.id == self.sort_setting.column_title);
        let next = match pos {
            Some(i) => self.columns.get((i + 1) % self.columns.len()),
            None => self.columns.first(),
        }?;
        Some(self.change_sort_setting(self.sort_setting.with_column(next.id)))
    }

    /// Index of the sorted column among the shown columns.
    pub fn sort_column_index(&self) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.id == self.sort_setting.column_title)
    }
}

/// Everything the section renders, derived from one set of props.
#[derive(Debug, Clone)]
pub struct RecentTransactionsView<'a> {
    /// Full column list, shared across renders with the same tenant flag.
    pub columns: Arc<[ColumnDescriptor]>,
    pub columns_selector: ColumnsSelectorView,
    pub statistics: TableStatisticsView<'a>,
    pub table: SortedTableView<'a>,
}

/// The section itself. Holds nothing but the column memo.
#[derive(Debug, Default)]
pub struct RecentTransactionsSection {
    columns: ColumnsMemo,
}

impl RecentTransactionsSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the view for one render.
    pub fn render<'a>(&mut self, props: &RecentTransactionsProps<'a>) -> RecentTransactionsView<'a> {
        let columns = self.columns.get(props.is_tenant.unwrap_or(false));

        // Selection changes often; these two are rebuilt every time.
        let shown_columns: Vec<ColumnDescriptor> = columns
            .iter()
            .filter(|c| is_selected_column(props.selected_columns, c))
            .copied()
            .collect();
        let table_columns = get_column_options(&columns, props.selected_columns);

        let active_filters = calculate_active_filters(props.filters);
        let is_empty_search_results = (!props.search.is_empty() || active_filters > 0)
            && props.transactions.is_empty();

        RecentTransactionsView {
            columns,
            columns_selector: ColumnsSelectorView {
                options: table_columns,
            },
            statistics: TableStatisticsView {
                pagination: props.pagination,
                search: props.search,
                total_count: props.transactions.len(),
                array_item_name: ARRAY_ITEM_NAME,
                active_filters,
            },
            table: SortedTableView {
                data: props.transactions,
                columns: shown_columns,
                sort_setting: props.sort_setting,
                pagination: props.pagination,
                no_result: EmptyTransactionsPlaceholder {
                    is_empty_search_results,
                    transaction_view: TransactionViewType::Active,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{self, make_recent_transactions_columns};
    use crate::filter::{TimeRange, TimeUnit};

    #[derive(Default)]
    struct Recorder {
        sort_settings: Vec<SortSetting>,
        clear_filters: usize,
        column_selections: Vec<Vec<String>>,
    }

    impl SectionCallbacks for Recorder {
        fn on_change_sort_setting(&mut self, setting: SortSetting) {
            self.sort_settings.push(setting);
        }

        fn on_clear_filters(&mut self) {
            self.clear_filters += 1;
        }

        fn on_columns_select(&mut self, columns: Vec<String>) {
            self.column_selections.push(columns);
        }
    }

    fn transactions(n: usize) -> Vec<RecentTransaction> {
        (0..n)
            .map(|i| RecentTransaction {
                execution_id: format!("0000000{}-aaaa-4bbb-8ccc-dddddddddddd", i),
                query: format!("SELECT {}", i),
                ..Default::default()
            })
            .collect()
    }

    struct Fixture {
        filters: RecentTransactionFilters,
        search: String,
        transactions: Vec<RecentTransaction>,
        selected_columns: Option<Vec<String>>,
        sort_setting: SortSetting,
        is_tenant: Option<bool>,
    }

    impl Default for Fixture {
        fn default() -> Self {
            Self {
                filters: RecentTransactionFilters::default(),
                search: String::new(),
                transactions: Vec::new(),
                selected_columns: None,
                sort_setting: SortSetting::default(),
                is_tenant: None,
            }
        }
    }

    impl Fixture {
        fn props(&self) -> RecentTransactionsProps<'_> {
            RecentTransactionsProps {
                filters: &self.filters,
                is_tenant: self.is_tenant,
                pagination: Pagination::default(),
                search: &self.search,
                transactions: &self.transactions,
                selected_columns: self.selected_columns.as_deref(),
                sort_setting: &self.sort_setting,
            }
        }
    }

    fn active_filter() -> RecentTransactionFilters {
        RecentTransactionFilters {
            app_names: vec!["app1".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn empty_without_search_or_filters_is_generic() {
        let fx = Fixture::default();
        let mut section = RecentTransactionsSection::new();
        let view = section.render(&fx.props());
        assert!(!view.table.no_result.is_empty_search_results);
        assert_eq!(view.table.no_result.transaction_view, TransactionViewType::Active);
        assert_eq!(view.table.no_result.title(), "No active SQL transactions");
        assert_eq!(view.statistics.total_count, 0);
        assert_eq!(view.statistics.active_filters, 0);
    }

    #[test]
    fn empty_with_search_is_search_result() {
        let fx = Fixture {
            search: "select".to_string(),
            ..Default::default()
        };
        let view = RecentTransactionsSection::new().render(&fx.props());
        assert!(view.table.no_result.is_empty_search_results);
        assert_eq!(view.table.no_result.title(), "No transactions match your search.");
    }

    #[test]
    fn empty_with_active_filter_is_search_result() {
        let fx = Fixture {
            filters: active_filter(),
            ..Default::default()
        };
        let view = RecentTransactionsSection::new().render(&fx.props());
        assert_eq!(view.statistics.active_filters, 1);
        assert!(view.table.no_result.is_empty_search_results);
    }

    #[test]
    fn non_empty_data_is_never_empty_search_result() {
        for (filters, search) in [
            (RecentTransactionFilters::default(), ""),
            (active_filter(), ""),
            (RecentTransactionFilters::default(), "select"),
            (
                RecentTransactionFilters {
                    time_range: TimeRange::new(3, TimeUnit::Seconds),
                    ..active_filter()
                },
                "x",
            ),
        ] {
            let fx = Fixture {
                filters,
                search: search.to_string(),
                transactions: transactions(5),
                ..Default::default()
            };
            let view = RecentTransactionsSection::new().render(&fx.props());
            assert!(!view.table.no_result.is_empty_search_results);
            assert_eq!(view.table.data.len(), 5);
            assert_eq!(view.table.data, &fx.transactions[..]);
            assert_eq!(view.statistics.total_count, 5);
        }
    }

    #[test]
    fn statistics_and_table_carry_props_verbatim() {
        let fx = Fixture {
            search: "upd".to_string(),
            sort_setting: SortSetting::new(columns::RETRIES, true),
            transactions: transactions(2),
            ..Default::default()
        };
        let view = RecentTransactionsSection::new().render(&fx.props());
        assert_eq!(view.statistics.search, "upd");
        assert_eq!(view.statistics.array_item_name, "transactions");
        assert_eq!(view.statistics.pagination, Pagination::default());
        assert_eq!(view.table.pagination, Pagination::default());
        assert_eq!(view.table.sort_setting, &fx.sort_setting);
    }

    #[test]
    fn columns_are_stable_across_renders_with_same_flag() {
        let mut fx = Fixture::default();
        let mut section = RecentTransactionsSection::new();

        let first = section.render(&fx.props()).columns;
        fx.selected_columns = Some(vec![columns::STATUS.to_string()]);
        fx.search = "changed".to_string();
        let second = section.render(&fx.props()).columns;
        assert!(Arc::ptr_eq(&first, &second));

        // Absent and false are the same key.
        fx.is_tenant = Some(false);
        let third = section.render(&fx.props()).columns;
        assert!(Arc::ptr_eq(&first, &third));

        fx.is_tenant = Some(true);
        let tenant = section.render(&fx.props()).columns;
        assert!(!Arc::ptr_eq(&first, &tenant));
        assert_eq!(&*tenant, &make_recent_transactions_columns(true)[..]);
    }

    #[test]
    fn shown_columns_follow_selection() {
        let mut fx = Fixture::default();
        let mut section = RecentTransactionsSection::new();

        let defaults: Vec<_> = section
            .render(&fx.props())
            .table
            .columns
            .iter()
            .map(|c| c.id)
            .collect();
        let expected: Vec<_> = make_recent_transactions_columns(false)
            .into_iter()
            .filter(|c| c.show_by_default != Some(false))
            .map(|c| c.id)
            .collect();
        assert_eq!(defaults, expected);

        fx.selected_columns = Some(vec![
            columns::APPLICATION_NAME.to_string(),
            columns::EXECUTION_ID.to_string(),
        ]);
        let view = section.render(&fx.props());
        let shown: Vec<_> = view.table.columns.iter().map(|c| c.id).collect();
        assert_eq!(shown, vec![columns::EXECUTION_ID, columns::APPLICATION_NAME]);

        let selected: Vec<_> = view
            .columns_selector
            .options
            .iter()
            .filter(|o| o.is_selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, shown);
        assert_eq!(view.columns_selector.options.len(), view.columns.len());
    }

    #[test]
    fn column_submit_calls_on_columns_select_once_unmodified() {
        let fx = Fixture::default();
        let view = RecentTransactionsSection::new().render(&fx.props());
        let ids = vec![
            columns::RETRIES.to_string(),
            "not-a-column".to_string(),
            columns::STATUS.to_string(),
        ];

        let mut recorder = Recorder::default();
        view.columns_selector
            .submit(ids.clone())
            .dispatch(&mut recorder);

        assert_eq!(recorder.column_selections, vec![ids]);
        assert!(recorder.sort_settings.is_empty());
        assert_eq!(recorder.clear_filters, 0);
    }

    #[test]
    fn clear_filters_and_sort_are_forwarded() {
        let fx = Fixture {
            filters: active_filter(),
            transactions: transactions(1),
            ..Default::default()
        };
        let view = RecentTransactionsSection::new().render(&fx.props());
        let mut recorder = Recorder::default();

        view.statistics.clear_filters().dispatch(&mut recorder);
        view.table
            .change_sort_setting(SortSetting::new(columns::STATUS, true))
            .dispatch(&mut recorder);

        assert_eq!(recorder.clear_filters, 1);
        assert_eq!(
            recorder.sort_settings,
            vec![SortSetting::new(columns::STATUS, true)]
        );
        assert!(recorder.column_selections.is_empty());
    }

    #[test]
    fn next_sort_column_wraps_over_shown_columns() {
        let fx = Fixture {
            sort_setting: SortSetting::new(columns::APPLICATION_NAME, true),
            ..Default::default()
        };
        let view = RecentTransactionsSection::new().render(&fx.props());
        assert_eq!(
            view.table.next_sort_column(),
            Some(SectionAction::ChangeSortSetting(SortSetting::new(
                columns::EXECUTION_ID,
                true
            )))
        );

        let fx = Fixture {
            selected_columns: Some(Vec::new()),
            ..Default::default()
        };
        let view = RecentTransactionsSection::new().render(&fx.props());
        assert_eq!(view.table.next_sort_column(), None);
    }
}
