// 🔮 Trend Forecast - least-squares line through monthly expenses
//
// Fits y = slope * x + intercept with x = month index and evaluates the line
// one month past the last observation. No confidence interval, no outlier
// handling. Fewer than two points is an explicit error.

use crate::analytics::MonthlySummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Relative tolerance under which a prediction counts as equal to the last value
const FLAT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("insufficient data: need at least 2 points, got {points}")]
    InsufficientData { points: usize },

    #[error("input contains a non-finite value")]
    NonFinite,

    #[error("all x values are identical, slope is undefined")]
    Degenerate,
}

/// Fitted regression line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over `(x, y)` points
pub fn linear_fit(points: &[(f64, f64)]) -> Result<LinearFit, ForecastError> {
    if points.len() < 2 {
        return Err(ForecastError::InsufficientData {
            points: points.len(),
        });
    }

    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(ForecastError::NonFinite);
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in points {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx == 0.0 {
        return Err(ForecastError::Degenerate);
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Increase,
    Decrease,
    Flat,
}

impl Trend {
    /// Strictly greater is an increase, strictly smaller a decrease.
    /// Values within a relative 1e-9 of each other are flat.
    pub fn classify(predicted: f64, last_observed: f64) -> Self {
        let scale = last_observed.abs().max(1.0);
        let delta = predicted - last_observed;

        if delta.abs() <= FLAT_TOLERANCE * scale {
            Trend::Flat
        } else if delta > 0.0 {
            Trend::Increase
        } else {
            Trend::Decrease
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Trend::Increase => "increase",
            Trend::Decrease => "decrease",
            Trend::Flat => "stay the same",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Prediction for the period after the last observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub fit: LinearFit,
    pub predicted: f64,
    pub last_observed: f64,
    pub trend: Trend,
}

impl Forecast {
    /// Prediction rounded to whole currency units, as displayed
    pub fn rounded(&self) -> f64 {
        self.predicted.round()
    }
}

/// Forecast the next value of an ordered series (index = position)
pub fn forecast_series(values: &[f64]) -> Result<Forecast, ForecastError> {
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();

    let fit = linear_fit(&points)?;
    let predicted = fit.predict(values.len() as f64);
    let last_observed = values[values.len() - 1];

    Ok(Forecast {
        fit,
        predicted,
        last_observed,
        trend: Trend::classify(predicted, last_observed),
    })
}

/// Next month's expenses from a monthly history
pub fn forecast_expenses(history: &[MonthlySummary]) -> Result<Forecast, ForecastError> {
    let expenses: Vec<f64> = history.iter().map(|m| m.expenses).collect();
    forecast_series(&expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_perfect_line_extrapolates_exactly() {
        let forecast = forecast_series(&[100.0, 200.0, 300.0, 400.0, 500.0]).unwrap();

        assert_eq!(forecast.predicted, 600.0);
        assert_eq!(forecast.fit.slope, 100.0);
        assert_eq!(forecast.fit.intercept, 100.0);
        assert_eq!(forecast.trend, Trend::Increase);
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let values = [2500.0, 2800.0, 2600.0, 2900.0, 2700.0, 3000.0];
        let first = forecast_series(&values).unwrap();
        let second = forecast_series(&values).unwrap();

        assert_eq!(first.predicted.to_bits(), second.predicted.to_bits());
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            forecast_series(&[]).unwrap_err(),
            ForecastError::InsufficientData { points: 0 }
        );
        assert_eq!(
            forecast_series(&[42.0]).unwrap_err(),
            ForecastError::InsufficientData { points: 1 }
        );
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(
            forecast_series(&[1.0, f64::NAN, 3.0]).unwrap_err(),
            ForecastError::NonFinite
        );
    }

    #[test]
    fn test_degenerate_x_values() {
        let result = linear_fit(&[(1.0, 2.0), (1.0, 5.0)]);
        assert_eq!(result.unwrap_err(), ForecastError::Degenerate);
    }

    #[test]
    fn test_decreasing_series() {
        let forecast = forecast_series(&[500.0, 400.0, 300.0]).unwrap();
        assert_eq!(forecast.predicted, 200.0);
        assert_eq!(forecast.trend, Trend::Decrease);
    }

    #[test]
    fn test_sample_history_lands_on_last_value() {
        // slope 500/7 and intercept 18000/7 put month 6 at exactly 3000
        let forecast = forecast_expenses(&Dataset::sample().history).unwrap();

        assert!((forecast.predicted - 3000.0).abs() < 1e-6);
        assert_eq!(forecast.rounded(), 3000.0);
        assert_eq!(forecast.trend, Trend::Flat);
    }

    #[test]
    fn test_trend_classification_boundaries() {
        assert_eq!(Trend::classify(101.0, 100.0), Trend::Increase);
        assert_eq!(Trend::classify(99.0, 100.0), Trend::Decrease);
        assert_eq!(Trend::classify(100.0, 100.0), Trend::Flat);
        assert_eq!(Trend::classify(0.0, 0.0), Trend::Flat);
    }
}
