// 🏠 Dashboard page - summary cards, spending overview, recent transactions

use super::{step_cursor, PageContext};
use crate::analytics::{CashFlow, DateRange, SeriesPoint};
use crate::entities::Transaction;
use chrono::NaiveDate;

/// Number of rows in the "Recent Transactions" card
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// Highlighted row in the recent transactions card
    pub selected_recent: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardMsg {
    NextRecent,
    PreviousRecent,
}

impl DashboardState {
    pub fn update(self, msg: DashboardMsg, ctx: &PageContext) -> Self {
        let len = ctx.dataset.transactions.len().min(RECENT_LIMIT);
        let selected_recent = match msg {
            DashboardMsg::NextRecent => step_cursor(self.selected_recent, len, true),
            DashboardMsg::PreviousRecent => step_cursor(self.selected_recent, len, false),
        };
        DashboardState { selected_recent }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: f64,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentTransaction {
    pub description: String,
    pub amount: f64,
    pub when: String,
}

/// Everything the dashboard shows, derived from the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<SummaryCard>,
    pub spending: Vec<SeriesPoint>,
    pub recent: Vec<RecentTransaction>,
}

impl DashboardView {
    pub fn build(ctx: &PageContext) -> Self {
        let dataset = ctx.dataset;
        let balance = CashFlow::from_transactions(&dataset.transactions).balance;
        let month = DateRange::month_of(dataset.as_of);
        let flow = CashFlow::from_transactions(
            dataset.transactions.iter().filter(|tx| month.contains(tx.date)),
        );

        let balance_caption = match net_change_pct(dataset) {
            Some(pct) => format!("{:+.1}% from last month", pct),
            None => "No history yet".to_string(),
        };

        let cards = vec![
            SummaryCard {
                title: "Total Balance",
                value: balance,
                caption: balance_caption,
            },
            SummaryCard {
                title: "Income",
                value: flow.income,
                caption: "This month".to_string(),
            },
            SummaryCard {
                title: "Expenses",
                value: flow.expenses,
                caption: "This month".to_string(),
            },
            SummaryCard {
                title: "Upcoming Bills",
                value: dataset.upcoming_bills_total(),
                caption: "Due this week".to_string(),
            },
        ];

        DashboardView {
            cards,
            spending: dataset.spending_overview.clone(),
            recent: recent_transactions(&dataset.transactions, dataset.as_of, ctx),
        }
    }
}

/// Newest first, at most `RECENT_LIMIT` rows
fn recent_transactions(
    transactions: &[Transaction],
    as_of: NaiveDate,
    ctx: &PageContext,
) -> Vec<RecentTransaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    sorted
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|tx| RecentTransaction {
            description: tx.description.clone(),
            amount: tx.amount,
            when: relative_day(tx.date, as_of, ctx),
        })
        .collect()
}

/// "Today", "Yesterday", "3 days ago", or the formatted date past a week
pub fn relative_day(date: NaiveDate, as_of: NaiveDate, ctx: &PageContext) -> String {
    match (as_of - date).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n @ 2..=6 => format!("{} days ago", n),
        _ => ctx.preferences.date_format.format(date),
    }
}

/// Month-over-month change of net savings, in percent
fn net_change_pct(dataset: &crate::dataset::Dataset) -> Option<f64> {
    let [.., previous, last] = dataset.history.as_slice() else {
        return None;
    };
    let base = previous.net();
    if base == 0.0 {
        return None;
    }
    Some((last.net() - base) / base.abs() * 100.0)
}
