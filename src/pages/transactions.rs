// 💳 Transactions page - search, filter panel, sortable table, CSV export

use super::{step_cursor, PageContext, StatusMessage};
use crate::entities::{Transaction, TransactionType};
use crate::export;
use crate::filter::{categories_in, types_in, SortField, SortState, TransactionFilter};
use chrono::{Duration, NaiveDate};

/// One row of the filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOption {
    Category(String),
    Type(TransactionType),
    StartDate,
    EndDate,
}

impl FilterOption {
    pub fn label(&self) -> String {
        match self {
            FilterOption::Category(category) => category.clone(),
            FilterOption::Type(transaction_type) => transaction_type.as_str().to_string(),
            FilterOption::StartDate => "Start date".to_string(),
            FilterOption::EndDate => "End date".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionsMsg {
    // Search box
    BeginSearch,
    EndSearch,
    SearchInput(char),
    SearchBackspace,

    // Filter panel
    ToggleFilters,
    FilterCursorUp,
    FilterCursorDown,
    /// Toggle the category or type under the cursor
    ToggleAtCursor,
    /// Move the date under the cursor by a number of days
    ShiftDateAtCursor(i64),
    ClearDateAtCursor,
    ToggleCategory(String),
    ToggleType(TransactionType),
    SetDates(Option<NaiveDate>, Option<NaiveDate>),
    ClearFilters,

    // Table
    Sort(SortField),
    SelectNext,
    SelectPrevious,

    ExportCsv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsState {
    pub filter: TransactionFilter,
    pub sort: SortState,
    pub show_filters: bool,

    /// Keystrokes go to the search box while true
    pub searching: bool,

    pub selected: Option<usize>,
    pub filter_cursor: usize,
    pub status: Option<StatusMessage>,
}

impl TransactionsState {
    pub fn new(ctx: &PageContext) -> Self {
        let selected = if ctx.dataset.transactions.is_empty() {
            None
        } else {
            Some(0)
        };

        TransactionsState {
            filter: TransactionFilter::new(),
            sort: SortState::default(),
            show_filters: false,
            searching: false,
            selected,
            filter_cursor: 0,
            status: None,
        }
    }

    /// Rows currently shown, filtered then sorted
    pub fn visible(&self, ctx: &PageContext) -> Vec<Transaction> {
        self.filter.apply(&ctx.dataset.transactions, self.sort)
    }

    /// Filter panel rows: categories, then types, then the two date bounds
    pub fn filter_options(ctx: &PageContext) -> Vec<FilterOption> {
        let transactions = &ctx.dataset.transactions;

        categories_in(transactions)
            .into_iter()
            .map(FilterOption::Category)
            .chain(types_in(transactions).into_iter().map(FilterOption::Type))
            .chain([FilterOption::StartDate, FilterOption::EndDate])
            .collect()
    }

    pub fn selected_transaction(&self, ctx: &PageContext) -> Option<Transaction> {
        self.selected
            .and_then(|i| self.visible(ctx).into_iter().nth(i))
    }

    pub fn update(mut self, msg: TransactionsMsg, ctx: &PageContext) -> Self {
        match msg {
            TransactionsMsg::BeginSearch => self.searching = true,
            TransactionsMsg::EndSearch => self.searching = false,
            TransactionsMsg::SearchInput(ch) => {
                self.filter.search.push(ch);
                self.reset_selection(ctx);
            }
            TransactionsMsg::SearchBackspace => {
                self.filter.search.pop();
                self.reset_selection(ctx);
            }

            TransactionsMsg::ToggleFilters => self.show_filters = !self.show_filters,
            TransactionsMsg::FilterCursorUp => {
                let len = Self::filter_options(ctx).len();
                self.filter_cursor = step_cursor(Some(self.filter_cursor), len, false).unwrap_or(0);
            }
            TransactionsMsg::FilterCursorDown => {
                let len = Self::filter_options(ctx).len();
                self.filter_cursor = step_cursor(Some(self.filter_cursor), len, true).unwrap_or(0);
            }
            TransactionsMsg::ToggleAtCursor => {
                match Self::filter_options(ctx).get(self.filter_cursor) {
                    Some(FilterOption::Category(category)) => self.filter.toggle_category(category),
                    Some(FilterOption::Type(transaction_type)) => {
                        self.filter.toggle_type(*transaction_type)
                    }
                    _ => return self,
                }
                self.reset_selection(ctx);
            }
            TransactionsMsg::ShiftDateAtCursor(days) => {
                let delta = Duration::days(days);
                let base = ctx.dataset.as_of;
                match Self::filter_options(ctx).get(self.filter_cursor) {
                    Some(FilterOption::StartDate) => {
                        self.filter.start = Some(self.filter.start.unwrap_or(base) + delta)
                    }
                    Some(FilterOption::EndDate) => {
                        self.filter.end = Some(self.filter.end.unwrap_or(base) + delta)
                    }
                    _ => return self,
                }
                self.reset_selection(ctx);
            }
            TransactionsMsg::ClearDateAtCursor => {
                match Self::filter_options(ctx).get(self.filter_cursor) {
                    Some(FilterOption::StartDate) => self.filter.start = None,
                    Some(FilterOption::EndDate) => self.filter.end = None,
                    _ => return self,
                }
                self.reset_selection(ctx);
            }
            TransactionsMsg::ToggleCategory(category) => {
                self.filter.toggle_category(&category);
                self.reset_selection(ctx);
            }
            TransactionsMsg::ToggleType(transaction_type) => {
                self.filter.toggle_type(transaction_type);
                self.reset_selection(ctx);
            }
            TransactionsMsg::SetDates(start, end) => {
                self.filter.start = start;
                self.filter.end = end;
                self.reset_selection(ctx);
            }
            TransactionsMsg::ClearFilters => {
                self.filter.clear();
                self.reset_selection(ctx);
            }

            TransactionsMsg::Sort(field) => self.sort = self.sort.toggle(field),
            TransactionsMsg::SelectNext => {
                self.selected = step_cursor(self.selected, self.visible(ctx).len(), true)
            }
            TransactionsMsg::SelectPrevious => {
                self.selected = step_cursor(self.selected, self.visible(ctx).len(), false)
            }

            TransactionsMsg::ExportCsv => {
                let rows = self.visible(ctx);
                self.status = Some(match export::write_csv(ctx.export_dir, &rows, ctx.today) {
                    Ok(path) => StatusMessage::info(format!(
                        "Exported {} transactions to {}",
                        rows.len(),
                        path.display()
                    )),
                    Err(e) => {
                        tracing::warn!(error = %e, "CSV export failed");
                        StatusMessage::error(format!("Export failed: {}", e))
                    }
                });
            }
        }

        self
    }

    // Reset selection to first row after the visible set changes
    fn reset_selection(&mut self, ctx: &PageContext) {
        self.selected = if self.visible(ctx).is_empty() {
            None
        } else {
            Some(0)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::filter::SortDirection;
    use crate::settings::Preferences;
    use std::path::Path;

    fn ctx<'a>(dataset: &'a Dataset, export_dir: &'a Path) -> PageContext<'a> {
        PageContext {
            dataset,
            preferences: Preferences::default(),
            export_dir,
            today: NaiveDate::from_ymd_opt(2024, 2, 21).unwrap(),
        }
    }

    fn ids(rows: &[Transaction]) -> Vec<&str> {
        rows.iter().map(|tx| tx.id.as_str()).collect()
    }

    #[test]
    fn test_initial_view_is_newest_first() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));
        let state = TransactionsState::new(&ctx);

        assert_eq!(ids(&state.visible(&ctx)), vec!["1", "2", "3", "4", "5"]);
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn test_search_typing_filters_rows() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));

        let state = "INCOME"
            .chars()
            .fold(TransactionsState::new(&ctx), |state, ch| {
                state.update(TransactionsMsg::SearchInput(ch), &ctx)
            });

        assert_eq!(ids(&state.visible(&ctx)), vec!["2", "5"]);

        let state = state.update(TransactionsMsg::SearchBackspace, &ctx);
        assert_eq!(state.filter.search, "INCOM");
    }

    #[test]
    fn test_filter_panel_cursor_toggles_options() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));

        let options = TransactionsState::filter_options(&ctx);
        assert_eq!(options[0], FilterOption::Category("Food".to_string()));
        assert_eq!(options.last(), Some(&FilterOption::EndDate));

        // Food is first; toggling it leaves only the grocery run
        let state = TransactionsState::new(&ctx)
            .update(TransactionsMsg::ToggleFilters, &ctx)
            .update(TransactionsMsg::ToggleAtCursor, &ctx);

        assert!(state.show_filters);
        assert_eq!(ids(&state.visible(&ctx)), vec!["1"]);
    }

    #[test]
    fn test_shifting_one_bound_leaves_dates_disabled() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));
        let options = TransactionsState::filter_options(&ctx);
        let start_row = options.len() - 2;

        let mut state = TransactionsState::new(&ctx);
        state.filter_cursor = start_row;
        let state = state.update(TransactionsMsg::ShiftDateAtCursor(-2), &ctx);

        assert_eq!(state.filter.start, NaiveDate::from_ymd_opt(2024, 2, 18));
        assert_eq!(state.visible(&ctx).len(), 5);

        let state = state
            .update(TransactionsMsg::FilterCursorDown, &ctx)
            .update(TransactionsMsg::ShiftDateAtCursor(-1), &ctx);

        assert_eq!(ids(&state.visible(&ctx)), vec!["2", "3"]);
    }

    #[test]
    fn test_inverted_dates_show_nothing() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));

        let state = TransactionsState::new(&ctx).update(
            TransactionsMsg::SetDates(
                NaiveDate::from_ymd_opt(2024, 2, 20),
                NaiveDate::from_ymd_opt(2024, 2, 16),
            ),
            &ctx,
        );

        assert!(state.visible(&ctx).is_empty());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_clear_filters_keeps_search() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));

        let state = TransactionsState::new(&ctx)
            .update(TransactionsMsg::SearchInput('s'), &ctx)
            .update(TransactionsMsg::ToggleType(TransactionType::Expense), &ctx)
            .update(TransactionsMsg::ClearFilters, &ctx);

        assert_eq!(state.filter.search, "s");
        assert!(!state.filter.has_panel_filters());
    }

    #[test]
    fn test_sort_messages_follow_toggle_rules() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));

        let state = TransactionsState::new(&ctx).update(TransactionsMsg::Sort(SortField::Amount), &ctx);
        assert_eq!(state.sort.direction, SortDirection::Descending);
        assert_eq!(ids(&state.visible(&ctx)), vec!["2", "5", "3", "4", "1"]);

        let state = state.update(TransactionsMsg::Sort(SortField::Amount), &ctx);
        assert_eq!(ids(&state.visible(&ctx)), vec!["1", "4", "3", "5", "2"]);
    }

    #[test]
    fn test_selection_wraps() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset, Path::new("."));

        let state = TransactionsState::new(&ctx).update(TransactionsMsg::SelectPrevious, &ctx);

        assert_eq!(state.selected, Some(4));
        assert_eq!(state.selected_transaction(&ctx).map(|tx| tx.id), Some("5".to_string()));
    }

    #[test]
    fn test_export_writes_visible_rows() {
        let dataset = Dataset::sample();
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx(&dataset, dir.path());

        let state = TransactionsState::new(&ctx)
            .update(TransactionsMsg::ToggleType(TransactionType::Income), &ctx)
            .update(TransactionsMsg::ExportCsv, &ctx);

        let status = state.status.unwrap();
        assert!(!status.is_error);

        let written = std::fs::read_to_string(dir.path().join("transactions_2024-02-21.csv")).unwrap();
        let parsed = export::from_csv(written.as_bytes()).unwrap();
        assert_eq!(ids(&parsed), vec!["2", "5"]);
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dataset = Dataset::sample();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let ctx = ctx(&dataset, &blocker);

        let state = TransactionsState::new(&ctx).update(TransactionsMsg::ExportCsv, &ctx);

        assert!(state.status.unwrap().is_error);
    }
}
