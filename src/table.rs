//! Table state shared by the section and its owner: sort setting,
//! pagination and row selection.
//!
//! Sort setting and pagination are carried through untouched; the rows are
//! displayed in the order the owner supplies them.

/// Sort column and direction, as chosen in the table header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSetting {
    /// Id of the sorted column.
    pub column_title: String,
    pub ascending: bool,
}

impl SortSetting {
    pub fn new(column_title: impl Into<String>, ascending: bool) -> Self {
        Self {
            column_title: column_title.into(),
            ascending,
        }
    }

    /// Same column, opposite direction.
    pub fn toggled(&self) -> Self {
        Self {
            column_title: self.column_title.clone(),
            ascending: !self.ascending,
        }
    }

    /// Different column, same direction.
    pub fn with_column(&self, column_title: impl Into<String>) -> Self {
        Self {
            column_title: column_title.into(),
            ascending: self.ascending,
        }
    }
}

impl Default for SortSetting {
    fn default() -> Self {
        // Longest-running transactions first.
        Self::new(crate::columns::ELAPSED_TIME, false)
    }
}

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub current: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            page_size: 20,
        }
    }
}

/// Selected row that follows the same transaction across refreshes.
#[derive(Debug, Clone, Default)]
pub struct TableSelection {
    /// Selected row index.
    pub selected: usize,
    /// Row id of the selected transaction.
    pub tracked_id: Option<u64>,
}

impl TableSelection {
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.tracked_id = None;
    }

    pub fn select_down(&mut self) {
        self.selected = self.selected.saturating_add(1);
        self.tracked_id = None;
    }

    pub fn page_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
        self.tracked_id = None;
    }

    pub fn page_down(&mut self, n: usize) {
        self.selected = self.selected.saturating_add(n);
        self.tracked_id = None;
    }

    pub fn home(&mut self) {
        self.selected = 0;
        self.tracked_id = None;
    }

    pub fn end(&mut self) {
        self.selected = usize::MAX;
        self.tracked_id = None;
    }

    /// Resolves selection against the ids of the rows currently shown.
    ///
    /// If the tracked row is still present, the selection moves to it.
    /// Otherwise the tracking is dropped and the index clamped. The tracked
    /// id is then taken from the selected row.
    pub fn resolve(&mut self, row_ids: &[u64]) {
        let len = row_ids.len();
        if len == 0 {
            self.selected = 0;
            self.tracked_id = None;
            return;
        }

        if let Some(tid) = self.tracked_id {
            if let Some(pos) = row_ids.iter().position(|&id| id == tid) {
                self.selected = pos;
            } else {
                self.tracked_id = None;
                if self.selected >= len {
                    self.selected = len - 1;
                }
            }
        } else if self.selected >= len {
            self.selected = len - 1;
        }

        self.tracked_id = row_ids.get(self.selected).copied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_setting_helpers() {
        let s = SortSetting::new("status", true);
        assert_eq!(s.toggled(), SortSetting::new("status", false));
        assert_eq!(s.with_column("retries"), SortSetting::new("retries", true));
    }

    #[test]
    fn selection_follows_tracked_row() {
        let mut sel = TableSelection::default();
        sel.resolve(&[10, 20, 30]);
        sel.select_down();
        sel.resolve(&[10, 20, 30]);
        assert_eq!(sel.selected, 1);
        assert_eq!(sel.tracked_id, Some(20));

        // Row 20 moved to the end after a refresh.
        sel.resolve(&[5, 10, 30, 20]);
        assert_eq!(sel.selected, 3);
        assert_eq!(sel.tracked_id, Some(20));
    }

    #[test]
    fn selection_clamps_when_tracked_row_disappears() {
        let mut sel = TableSelection::default();
        sel.end();
        sel.resolve(&[1, 2, 3, 4]);
        assert_eq!(sel.selected, 3);
        assert_eq!(sel.tracked_id, Some(4));

        sel.resolve(&[1, 2]);
        assert_eq!(sel.selected, 1);
        assert_eq!(sel.tracked_id, Some(2));
    }

    #[test]
    fn selection_resets_on_empty() {
        let mut sel = TableSelection::default();
        sel.page_down(5);
        sel.resolve(&[]);
        assert_eq!(sel.selected, 0);
        assert_eq!(sel.tracked_id, None);
    }
}
