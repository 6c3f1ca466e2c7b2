// 📋 Summary report - cash flow, budgets and forecast in one value
//
// Used by the `summary` command. Serializes to JSON or renders as text.

use crate::analytics::CashFlow;
use crate::dataset::Dataset;
use crate::forecast::{forecast_expenses, Trend};
use crate::progress::{BudgetOverview, Severity};
use crate::settings::Currency;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub percentage: Option<f64>,
    pub severity: Option<Severity>,
    pub near_limit: bool,

    /// Set when progress could not be computed
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastLine {
    pub predicted: Option<f64>,
    pub last_observed: Option<f64>,
    pub trend: Option<Trend>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub as_of: chrono::NaiveDate,
    pub transaction_count: usize,
    pub cash_flow: CashFlow,
    pub upcoming_bills: f64,
    pub budgets: Vec<BudgetLine>,
    pub overview: BudgetOverview,
    pub forecast: ForecastLine,
}

impl SummaryReport {
    pub fn build(dataset: &Dataset) -> Self {
        let budgets = dataset
            .budgets
            .iter()
            .map(|budget| match budget.progress() {
                Ok(progress) => BudgetLine {
                    category: budget.category.clone(),
                    limit: budget.limit,
                    spent: budget.spent,
                    percentage: Some(progress.percentage),
                    severity: Some(progress.severity),
                    near_limit: progress.near_limit,
                    error: None,
                },
                Err(e) => BudgetLine {
                    category: budget.category.clone(),
                    limit: budget.limit,
                    spent: budget.spent,
                    percentage: None,
                    severity: None,
                    near_limit: false,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        let forecast = match forecast_expenses(&dataset.history) {
            Ok(f) => ForecastLine {
                predicted: Some(f.predicted),
                last_observed: Some(f.last_observed),
                trend: Some(f.trend),
                error: None,
            },
            Err(e) => ForecastLine {
                predicted: None,
                last_observed: None,
                trend: None,
                error: Some(e.to_string()),
            },
        };

        SummaryReport {
            as_of: dataset.as_of,
            transaction_count: dataset.transactions.len(),
            cash_flow: CashFlow::from_transactions(&dataset.transactions),
            upcoming_bills: dataset.upcoming_bills_total(),
            budgets,
            overview: BudgetOverview::from_budgets(&dataset.budgets),
            forecast,
        }
    }

    /// Plain-text rendering for the terminal
    pub fn render(&self, currency: Currency) -> String {
        let mut out = String::new();
        let money = |amount: f64| currency.format_amount(amount);

        out.push_str(&format!(
            "FinSight summary as of {} ({} transactions)\n",
            self.as_of, self.transaction_count
        ));
        out.push_str(&format!(
            "Balance {}  Income {}  Expenses {}  Upcoming bills {}\n",
            money(self.cash_flow.balance),
            money(self.cash_flow.income),
            money(self.cash_flow.expenses),
            money(self.upcoming_bills)
        ));

        out.push_str("\nBudgets\n");
        for line in &self.budgets {
            match (line.percentage, line.severity) {
                (Some(pct), Some(severity)) => out.push_str(&format!(
                    "  {:<16} {:>10} / {:<10} {:>4.0}%  {}{}\n",
                    line.category,
                    money(line.spent),
                    money(line.limit),
                    pct,
                    severity.as_str(),
                    if line.near_limit { " (near limit)" } else { "" }
                )),
                _ => out.push_str(&format!(
                    "  {:<16} invalid: {}\n",
                    line.category,
                    line.error.as_deref().unwrap_or("unknown")
                )),
            }
        }
        out.push_str(&format!(
            "  Total {} of {} ({} remaining)\n",
            money(self.overview.total_spent),
            money(self.overview.total_limit),
            money(self.overview.remaining())
        ));

        out.push_str("\nForecast\n");
        match (self.forecast.predicted, self.forecast.trend) {
            (Some(predicted), Some(trend)) => out.push_str(&format!(
                "  Next month's expenses: {} (expected to {})\n",
                money(predicted.round()),
                trend.verb()
            )),
            _ => out.push_str(&format!(
                "  Unavailable: {}\n",
                self.forecast.error.as_deref().unwrap_or("unknown")
            )),
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Budget;

    #[test]
    fn test_build_from_sample() {
        let report = SummaryReport::build(&Dataset::sample());

        assert_eq!(report.transaction_count, 5);
        assert_eq!(report.cash_flow.balance, 4120.0);
        assert_eq!(report.budgets.len(), 4);
        assert_eq!(report.budgets[0].severity, Some(Severity::Critical));
        assert!(report.budgets[0].near_limit);
        assert_eq!(report.overview.critical, 2);
        assert_eq!(report.forecast.trend, Some(Trend::Flat));
    }

    #[test]
    fn test_invalid_budget_and_short_history() {
        let mut dataset = Dataset::sample();
        dataset.budgets = vec![Budget::new("1", "Travel", 0.0, 50.0, true)];
        dataset.history.truncate(1);

        let report = SummaryReport::build(&dataset);

        assert!(report.budgets[0].error.is_some());
        assert!(report.forecast.predicted.is_none());
        assert!(report.forecast.error.is_some());

        let text = report.render(Currency::Usd);
        assert!(text.contains("Travel"));
        assert!(text.contains("invalid"));
        assert!(text.contains("Unavailable"));
    }

    #[test]
    fn test_render_and_json() {
        let report = SummaryReport::build(&Dataset::sample());

        let text = report.render(Currency::Usd);
        assert!(text.contains("Balance $4,120.00"));
        assert!(text.contains("(near limit)"));
        assert!(text.contains("$3,000.00"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["cash_flow"]["income"], 4300.0);
        assert_eq!(json["budgets"][1]["severity"], "Warning");
    }
}
