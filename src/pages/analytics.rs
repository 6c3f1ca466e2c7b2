// 📈 Analytics page - charts view and expense predictions

use super::PageContext;
use crate::analytics::{spending_by_category_in, DateRange, SeriesPoint};
use crate::forecast::{forecast_expenses, Forecast, ForecastError, Trend};
use chrono::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalyticsView {
    #[default]
    Charts,
    Predictions,
}

impl AnalyticsView {
    pub fn title(&self) -> &'static str {
        match self {
            AnalyticsView::Charts => "Charts",
            AnalyticsView::Predictions => "Predictions",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AnalyticsView::Charts => AnalyticsView::Predictions,
            AnalyticsView::Predictions => AnalyticsView::Charts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsMsg {
    ShowCharts,
    ShowPredictions,
    ToggleView,
    ShiftStart(i64),
    ShiftEnd(i64),
    /// Back to the month ending on the dataset date
    ResetRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsState {
    pub view: AnalyticsView,
    pub range: DateRange,
}

impl AnalyticsState {
    pub fn new(ctx: &PageContext) -> Self {
        AnalyticsState {
            view: AnalyticsView::default(),
            range: DateRange::last_month(ctx.dataset.as_of),
        }
    }

    pub fn update(mut self, msg: AnalyticsMsg, ctx: &PageContext) -> Self {
        match msg {
            AnalyticsMsg::ShowCharts => self.view = AnalyticsView::Charts,
            AnalyticsMsg::ShowPredictions => self.view = AnalyticsView::Predictions,
            AnalyticsMsg::ToggleView => self.view = self.view.toggled(),
            AnalyticsMsg::ShiftStart(days) => self.range.start += Duration::days(days),
            AnalyticsMsg::ShiftEnd(days) => self.range.end += Duration::days(days),
            AnalyticsMsg::ResetRange => self.range = DateRange::last_month(ctx.dataset.as_of),
        }
        self
    }

    /// Expense totals per category inside the selected range
    pub fn spending(&self, ctx: &PageContext) -> Vec<SeriesPoint> {
        spending_by_category_in(&ctx.dataset.transactions, self.range)
    }

    pub fn forecast(ctx: &PageContext) -> Result<Forecast, ForecastError> {
        forecast_expenses(&ctx.dataset.history)
    }

    /// The sentence shown on the predictions card
    pub fn prediction_text(ctx: &PageContext) -> String {
        match Self::forecast(ctx) {
            Ok(forecast) => {
                let outlook = match forecast.trend {
                    Trend::Flat => "This equals this month's expenses.".to_string(),
                    trend => format!("This is expected to {} compared to this month.", trend.verb()),
                };
                format!(
                    "Based on your spending patterns, next month's expenses are predicted to be {}. {}",
                    ctx.preferences.currency.format_amount(forecast.rounded()),
                    outlook
                )
            }
            Err(ForecastError::InsufficientData { points }) => format!(
                "Insufficient data for a prediction ({} month{} of history, need at least 2).",
                points,
                if points == 1 { "" } else { "s" }
            ),
            Err(e) => format!("No prediction available: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MonthlySummary;
    use crate::dataset::Dataset;
    use crate::settings::Preferences;
    use chrono::NaiveDate;
    use std::path::Path;

    fn ctx(dataset: &Dataset) -> PageContext<'_> {
        PageContext {
            dataset,
            preferences: Preferences::default(),
            export_dir: Path::new("."),
            today: dataset.as_of,
        }
    }

    #[test]
    fn test_default_range_is_last_month() {
        let dataset = Dataset::sample();
        let state = AnalyticsState::new(&ctx(&dataset));

        assert_eq!(state.view, AnalyticsView::Charts);
        assert_eq!(state.range.start, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(state.range.end, dataset.as_of);
    }

    #[test]
    fn test_view_toggle() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset);

        let state = AnalyticsState::new(&ctx).update(AnalyticsMsg::ToggleView, &ctx);
        assert_eq!(state.view, AnalyticsView::Predictions);

        let state = state.update(AnalyticsMsg::ShowCharts, &ctx);
        assert_eq!(state.view, AnalyticsView::Charts);
    }

    #[test]
    fn test_range_restricts_spending() {
        let dataset = Dataset::sample();
        let ctx = ctx(&dataset);

        let all = AnalyticsState::new(&ctx);
        assert_eq!(all.spending(&ctx).len(), 3);

        // Drop the grocery run on the 20th
        let narrowed = all.update(AnalyticsMsg::ShiftEnd(-1), &ctx);
        let labels: Vec<String> = narrowed.spending(&ctx).into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["Transportation", "Entertainment"]);

        let reset = narrowed.update(AnalyticsMsg::ResetRange, &ctx);
        assert_eq!(reset, all);
    }

    #[test]
    fn test_prediction_text() {
        let dataset = Dataset::sample();
        let text = AnalyticsState::prediction_text(&ctx(&dataset));

        assert!(text.contains("$3,000.00"));
        assert!(text.contains("This equals this month's expenses."));
    }

    #[test]
    fn test_prediction_text_for_rising_expenses() {
        let mut dataset = Dataset::sample();
        dataset.history = vec![
            MonthlySummary::new("Jan", 3000.0, 1000.0),
            MonthlySummary::new("Feb", 3000.0, 1200.0),
            MonthlySummary::new("Mar", 3000.0, 1400.0),
        ];

        let text = AnalyticsState::prediction_text(&ctx(&dataset));

        assert!(text.contains("$1,600.00"));
        assert!(text.contains("This is expected to increase compared to this month."));
    }

    #[test]
    fn test_prediction_text_with_short_history() {
        let mut dataset = Dataset::sample();
        dataset.history = vec![MonthlySummary::new("Jan", 3000.0, 2500.0)];

        let text = AnalyticsState::prediction_text(&ctx(&dataset));

        assert!(text.starts_with("Insufficient data"));
        assert!(text.contains("1 month of history"));
    }
}
