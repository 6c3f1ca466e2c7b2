// 📈 Analytics - chart series and aggregates derived from the dataset
//
// Everything here is a pure function of its inputs. The TUI turns these
// series into ratatui charts; nothing in this module knows about rendering.

use crate::entities::Transaction;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Income and expense totals for one month of history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlySummary {
    pub fn new(month: impl Into<String>, income: f64, expenses: f64) -> Self {
        MonthlySummary {
            month: month.into(),
            income,
            expenses,
        }
    }

    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// A labelled value, one bar or one point on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        SeriesPoint {
            label: label.into(),
            value,
        }
    }
}

/// How money is split between savings, spending and investments (percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub savings: f64,
    pub expenses: f64,
    pub investments: f64,
}

impl Distribution {
    pub fn slices(&self) -> [(&'static str, f64); 3] {
        [
            ("Savings", self.savings),
            ("Expenses", self.expenses),
            ("Investments", self.investments),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    Positive,
    Improvement,
    Recommendation,
}

impl InsightKind {
    pub fn title(&self) -> &'static str {
        match self {
            InsightKind::Positive => "Positive Trends",
            InsightKind::Improvement => "Areas for Improvement",
            InsightKind::Recommendation => "Recommendations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Insight {
            kind,
            message: message.into(),
        }
    }
}

/// Inclusive calendar window used by the analytics page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// One calendar month ending on `today`
    pub fn last_month(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(today);
        DateRange { start, end: today }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Expense magnitude per category, largest first
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        *totals.entry(tx.category.as_str()).or_insert(0.0) += tx.amount.abs();
    }

    let mut result: Vec<SeriesPoint> = totals
        .into_iter()
        .map(|(category, total)| SeriesPoint::new(category, total))
        .collect();

    result.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.label.cmp(&b.label))
    });
    result
}

/// Same as `spending_by_category`, restricted to a date window
pub fn spending_by_category_in(transactions: &[Transaction], range: DateRange) -> Vec<SeriesPoint> {
    let in_range: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| range.contains(tx.date))
        .cloned()
        .collect();
    spending_by_category(&in_range)
}

/// `(index, value)` points for the income and expense lines of a chart
pub fn income_expense_points(history: &[MonthlySummary]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let income = history
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.income))
        .collect();
    let expenses = history
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.expenses))
        .collect();
    (income, expenses)
}

/// Totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub balance: f64,
    pub income: f64,
    pub expenses: f64,
    pub income_count: usize,
    pub expense_count: usize,
}

impl CashFlow {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut flow = CashFlow::default();

        for tx in transactions {
            flow.balance += tx.amount;
            if tx.is_income() {
                flow.income += tx.amount;
                flow.income_count += 1;
            } else {
                flow.expenses += tx.amount.abs();
                flow.expense_count += 1;
            }
        }

        flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_month_of_covers_calendar_month() {
        let feb = DateRange::month_of(date("2024-02-20"));
        assert_eq!(feb.start, date("2024-02-01"));
        assert_eq!(feb.end, date("2024-02-29"));

        let dec = DateRange::month_of(date("2023-12-31"));
        assert_eq!((dec.start, dec.end), (date("2023-12-01"), date("2023-12-31")));
    }

    #[test]
    fn test_cash_flow_over_filtered_rows() {
        let dataset = Dataset::sample();
        let january = DateRange::month_of(date("2024-01-10"));

        let flow = CashFlow::from_transactions(
            dataset.transactions.iter().filter(|tx| january.contains(tx.date)),
        );

        assert_eq!(flow, CashFlow::default());
    }

    #[test]
    fn test_spending_by_category_sums_expenses_only() {
        let dataset = Dataset::sample();
        let spending = spending_by_category(&dataset.transactions);

        assert_eq!(
            spending,
            vec![
                SeriesPoint::new("Food", 120.0),
                SeriesPoint::new("Transportation", 45.0),
                SeriesPoint::new("Entertainment", 15.0),
            ]
        );
    }

    #[test]
    fn test_spending_by_category_respects_range() {
        let dataset = Dataset::sample();
        let range = DateRange {
            start: date("2024-02-17"),
            end: date("2024-02-19"),
        };

        let spending = spending_by_category_in(&dataset.transactions, range);
        let labels: Vec<&str> = spending.iter().map(|p| p.label.as_str()).collect();

        assert_eq!(labels, vec!["Transportation", "Entertainment"]);
    }

    #[test]
    fn test_last_month_range() {
        let range = DateRange::last_month(date("2024-03-31"));
        assert_eq!(range.start, date("2024-02-29"));
        assert!(range.contains(date("2024-03-15")));
        assert!(!range.contains(date("2024-02-28")));
    }

    #[test]
    fn test_cash_flow() {
        let flow = CashFlow::from_transactions(&Dataset::sample().transactions);

        assert_eq!(flow.balance, 4120.0);
        assert_eq!(flow.income, 4300.0);
        assert_eq!(flow.expenses, 180.0);
        assert_eq!(flow.income_count, 2);
        assert_eq!(flow.expense_count, 3);
    }

    #[test]
    fn test_income_expense_points() {
        let history = vec![
            MonthlySummary::new("Jan", 3000.0, 2500.0),
            MonthlySummary::new("Feb", 3500.0, 2800.0),
        ];

        let (income, expenses) = income_expense_points(&history);

        assert_eq!(income, vec![(0.0, 3000.0), (1.0, 3500.0)]);
        assert_eq!(expenses, vec![(0.0, 2500.0), (1.0, 2800.0)]);
        assert_eq!(history[1].net(), 700.0);
    }
}
