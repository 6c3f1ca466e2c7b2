// 📦 Dataset - the in-memory data every page renders from
//
// The sample dataset is built from literals at startup. Transactions can be
// replaced by a CSV file (config `data.transactions_csv`); budgets, history
// and insights always come from the sample.

use crate::analytics::{Distribution, Insight, InsightKind, MonthlySummary, SeriesPoint};
use crate::entities::{Budget, Transaction, User};
use crate::export;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// A bill that is due on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub name: String,
    pub amount: f64,
    pub due: NaiveDate,
}

impl Bill {
    pub fn new(name: impl Into<String>, amount: f64, due: NaiveDate) -> Self {
        Bill {
            name: name.into(),
            amount,
            due,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub user: User,

    /// Reference "today" for relative labels ("Yesterday", "due this week")
    pub as_of: NaiveDate,

    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub bills: Vec<Bill>,

    /// Six months of income/expense totals (analytics + forecast)
    pub history: Vec<MonthlySummary>,

    /// Monthly spending line on the dashboard
    pub spending_overview: Vec<SeriesPoint>,

    pub distribution: Distribution,
    pub insights: Vec<Insight>,
    pub patterns: Vec<Insight>,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl Dataset {
    /// Built-in demo data
    pub fn sample() -> Self {
        let transactions = vec![
            Transaction::new("1", "Grocery Shopping", -120.0, "Food", ymd(2024, 2, 20)),
            Transaction::new("2", "Salary Deposit", 3500.0, "Income", ymd(2024, 2, 19)),
            Transaction::new("3", "Netflix Subscription", -15.0, "Entertainment", ymd(2024, 2, 18)),
            Transaction::new("4", "Gas Station", -45.0, "Transportation", ymd(2024, 2, 17)),
            Transaction::new("5", "Freelance Payment", 800.0, "Income", ymd(2024, 2, 16)),
        ];

        let budgets = vec![
            Budget::new("1", "Food & Dining", 500.0, 450.0, true),
            Budget::new("2", "Transportation", 200.0, 150.0, true),
            Budget::new("3", "Entertainment", 300.0, 280.0, true),
            Budget::new("4", "Shopping", 400.0, 200.0, false),
        ];

        let bills = vec![
            Bill::new("Rent", 1200.0, ymd(2024, 2, 23)),
            Bill::new("Electricity", 240.0, ymd(2024, 2, 24)),
            Bill::new("Internet", 60.0, ymd(2024, 2, 26)),
            Bill::new("Car Insurance", 180.0, ymd(2024, 3, 5)),
        ];

        let history = vec![
            MonthlySummary::new("Jan", 3000.0, 2500.0),
            MonthlySummary::new("Feb", 3500.0, 2800.0),
            MonthlySummary::new("Mar", 3200.0, 2600.0),
            MonthlySummary::new("Apr", 3800.0, 2900.0),
            MonthlySummary::new("May", 3600.0, 2700.0),
            MonthlySummary::new("Jun", 4000.0, 3000.0),
        ];

        let spending_overview = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
            .iter()
            .zip([3000.0, 2800.0, 3200.0, 2900.0, 3100.0, 2700.0])
            .map(|(month, value)| SeriesPoint::new(*month, value))
            .collect();

        Dataset {
            user: User::new("1", "demo@finsight.app"),
            as_of: ymd(2024, 2, 20),
            transactions,
            budgets,
            bills,
            history,
            spending_overview,
            distribution: Distribution {
                savings: 30.0,
                expenses: 50.0,
                investments: 20.0,
            },
            insights: vec![
                Insight::new(
                    InsightKind::Positive,
                    "Your savings rate has increased by 15% compared to last month.",
                ),
                Insight::new(
                    InsightKind::Improvement,
                    "Entertainment spending is 20% higher than your monthly average.",
                ),
                Insight::new(
                    InsightKind::Recommendation,
                    "Consider increasing your investment allocation to meet your yearly goals.",
                ),
            ],
            patterns: vec![
                Insight::new(
                    InsightKind::Positive,
                    "Recurring Expenses: monthly subscriptions and bills make up 45% of your expenses",
                ),
                Insight::new(
                    InsightKind::Improvement,
                    "Seasonal Patterns: your spending typically increases during summer months",
                ),
                Insight::new(
                    InsightKind::Recommendation,
                    "Savings Potential: you could save an additional $200/month by optimizing subscriptions",
                ),
            ],
        }
    }

    /// Sample data with transactions replaced by the rows of a CSV file
    pub fn with_transactions_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open transactions CSV: {:?}", path))?;
        let transactions = export::from_csv(file)
            .with_context(|| format!("Failed to read transactions CSV: {:?}", path))?;

        tracing::info!(
            path = %path.display(),
            count = transactions.len(),
            "Loaded transactions from CSV"
        );

        let mut dataset = Dataset::sample();
        if let Some(latest) = transactions.iter().map(|tx| tx.date).max() {
            dataset.as_of = latest;
        }
        dataset.transactions = transactions;
        Ok(dataset)
    }

    /// Bills due within seven days of `as_of` (inclusive)
    pub fn upcoming_bills(&self) -> Vec<&Bill> {
        let horizon = self.as_of + chrono::Duration::days(7);
        self.bills
            .iter()
            .filter(|bill| bill.due >= self.as_of && bill.due <= horizon)
            .collect()
    }

    pub fn upcoming_bills_total(&self) -> f64 {
        self.upcoming_bills().iter().map(|bill| bill.amount).sum()
    }
}
