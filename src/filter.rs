// 🔎 Transaction Filter - search, category/type/date predicates and sorting
//
// All predicates are combined with AND. Empty category/type sets mean "no
// restriction". The date window only applies when BOTH bounds are set; an
// inverted window (start > end) matches nothing.

use crate::entities::{Transaction, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

// ============================================================================
// SORTING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Date,
    Description,
    Category,
    Amount,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Date,
        SortField::Description,
        SortField::Category,
        SortField::Amount,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SortField::Date => "Date",
            SortField::Description => "Description",
            SortField::Category => "Category",
            SortField::Amount => "Amount",
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Category => a.category.cmp(&b.category),
            SortField::Amount => a.amount.total_cmp(&b.amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            field: SortField::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Same field flips the direction, a new field starts descending
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            SortState {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            SortState {
                field,
                direction: SortDirection::Descending,
            }
        }
    }

    pub fn sort(&self, transactions: &mut [Transaction]) {
        let field = self.field;
        match self.direction {
            SortDirection::Ascending => transactions.sort_by(|a, b| field.compare(a, b)),
            SortDirection::Descending => transactions.sort_by(|a, b| field.compare(b, a)),
        }
    }
}

// ============================================================================
// FILTER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub search: String,
    pub categories: BTreeSet<String>,
    pub types: BTreeSet<TransactionType>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.types.insert(transaction_type);
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Add the category if absent, remove it otherwise
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    pub fn toggle_type(&mut self, transaction_type: TransactionType) {
        if !self.types.remove(&transaction_type) {
            self.types.insert(transaction_type);
        }
    }

    /// Reset categories, types and dates. The search text is kept.
    pub fn clear(&mut self) {
        self.categories.clear();
        self.types.clear();
        self.start = None;
        self.end = None;
    }

    /// Whether any panel filter (not the search box) is set
    pub fn has_panel_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.types.is_empty()
            || self.start.is_some()
            || self.end.is_some()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_search(tx)
            && self.matches_category(tx)
            && self.matches_type(tx)
            && self.matches_dates(tx)
    }

    fn matches_search(&self, tx: &Transaction) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        tx.description.to_lowercase().contains(&needle)
            || tx.category.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, tx: &Transaction) -> bool {
        self.categories.is_empty() || self.categories.contains(&tx.category)
    }

    fn matches_type(&self, tx: &Transaction) -> bool {
        self.types.is_empty() || self.types.contains(&tx.transaction_type)
    }

    fn matches_dates(&self, tx: &Transaction) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= tx.date && tx.date <= end,
            _ => true,
        }
    }

    /// Filter then order a dataset
    pub fn apply(&self, transactions: &[Transaction], sort: SortState) -> Vec<Transaction> {
        let mut result: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect();

        sort.sort(&mut result);

        tracing::debug!(
            total = transactions.len(),
            matched = result.len(),
            field = sort.field.title(),
            "Recomputed transaction view"
        );

        result
    }
}

/// Distinct categories in first-seen order
pub fn categories_in(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = Vec::new();
    for tx in transactions {
        if !seen.contains(&tx.category) {
            seen.push(tx.category.clone());
        }
    }
    seen
}

/// Distinct transaction types in first-seen order
pub fn types_in(transactions: &[Transaction]) -> Vec<TransactionType> {
    let mut seen = Vec::new();
    for tx in transactions {
        if !seen.contains(&tx.transaction_type) {
            seen.push(tx.transaction_type);
        }
    }
    seen
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Vec<Transaction> {
        Dataset::sample().transactions
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|tx| tx.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let txs = sample();
        let result = TransactionFilter::new().apply(&txs, SortState::default());
        assert_eq!(result.len(), txs.len());
    }

    #[test]
    fn test_empty_sets_equal_full_sets() {
        let txs = sample();
        let sort = SortState::default();

        let mut everything = TransactionFilter::new();
        for category in categories_in(&txs) {
            everything.categories.insert(category);
        }
        for kind in types_in(&txs) {
            everything.types.insert(kind);
        }

        assert_eq!(
            TransactionFilter::new().apply(&txs, sort),
            everything.apply(&txs, sort)
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_description_and_category() {
        let txs = sample();

        let by_description = TransactionFilter::new()
            .with_search("NETFLIX")
            .apply(&txs, SortState::default());
        assert_eq!(ids(&by_description), vec!["3"]);

        let by_category = TransactionFilter::new()
            .with_search("income")
            .apply(&txs, SortState::default());
        assert_eq!(ids(&by_category), vec!["2", "5"]);
    }

    #[test]
    fn test_category_and_type_filters_combine() {
        let txs = sample();

        let result = TransactionFilter::new()
            .with_category("Income")
            .with_type(TransactionType::Expense)
            .apply(&txs, SortState::default());

        assert!(result.is_empty());

        let result = TransactionFilter::new()
            .with_type(TransactionType::Expense)
            .apply(&txs, SortState::default());

        assert_eq!(ids(&result), vec!["1", "3", "4"]);
    }

    #[test]
    fn test_date_window_is_inclusive() {
        let txs = sample();

        let result = TransactionFilter::new()
            .with_dates(Some(date("2024-02-17")), Some(date("2024-02-19")))
            .apply(&txs, SortState::default());

        assert_eq!(ids(&result), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_single_date_bound_disables_window() {
        let txs = sample();

        let only_start = TransactionFilter::new()
            .with_dates(Some(date("2024-02-19")), None)
            .apply(&txs, SortState::default());
        let only_end = TransactionFilter::new()
            .with_dates(None, Some(date("2024-02-16")))
            .apply(&txs, SortState::default());

        assert_eq!(only_start.len(), txs.len());
        assert_eq!(only_end.len(), txs.len());
    }

    #[test]
    fn test_inverted_window_matches_nothing() {
        let txs = sample();

        let result = TransactionFilter::new()
            .with_dates(Some(date("2024-02-20")), Some(date("2024-02-16")))
            .apply(&txs, SortState::default());

        assert!(result.is_empty());
    }

    #[test]
    fn test_amount_sort_directions_are_reversed() {
        let txs = sample();
        let filter = TransactionFilter::new();

        let ascending = filter.apply(
            &txs,
            SortState {
                field: SortField::Amount,
                direction: SortDirection::Ascending,
            },
        );
        let mut descending = filter.apply(
            &txs,
            SortState {
                field: SortField::Amount,
                direction: SortDirection::Descending,
            },
        );
        descending.reverse();

        assert_eq!(ascending, descending);
        assert_eq!(ascending[0].amount, -120.0);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let result = TransactionFilter::new().apply(&sample(), SortState::default());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_text_sort_is_bytewise() {
        let result = TransactionFilter::new().apply(
            &sample(),
            SortState {
                field: SortField::Description,
                direction: SortDirection::Ascending,
            },
        );

        assert_eq!(result[0].description, "Freelance Payment");
        assert_eq!(result[4].description, "Salary Deposit");
    }

    #[test]
    fn test_sort_toggle() {
        let sort = SortState::default();
        assert_eq!(sort.field, SortField::Date);
        assert_eq!(sort.direction, SortDirection::Descending);

        let flipped = sort.toggle(SortField::Date);
        assert_eq!(flipped.direction, SortDirection::Ascending);

        let switched = flipped.toggle(SortField::Amount);
        assert_eq!(switched.field, SortField::Amount);
        assert_eq!(switched.direction, SortDirection::Descending);
    }

    #[test]
    fn test_clear_keeps_search() {
        let mut filter = TransactionFilter::new()
            .with_search("gas")
            .with_category("Food")
            .with_type(TransactionType::Income)
            .with_dates(Some(date("2024-01-01")), Some(date("2024-12-31")));

        filter.clear();

        assert_eq!(filter.search, "gas");
        assert!(!filter.has_panel_filters());
    }

    #[test]
    fn test_toggle_category_and_type() {
        let mut filter = TransactionFilter::new();

        filter.toggle_category("Food");
        filter.toggle_type(TransactionType::Expense);
        assert!(filter.categories.contains("Food"));
        assert!(filter.types.contains(&TransactionType::Expense));

        filter.toggle_category("Food");
        filter.toggle_type(TransactionType::Expense);
        assert!(filter.categories.is_empty());
        assert!(filter.types.is_empty());
    }

    #[test]
    fn test_distinct_values_keep_first_seen_order() {
        let txs = sample();
        assert_eq!(
            categories_in(&txs),
            vec!["Food", "Income", "Entertainment", "Transportation"]
        );
        assert_eq!(
            types_in(&txs),
            vec![TransactionType::Expense, TransactionType::Income]
        );
    }
}
