// 🚦 Budget Progress - utilisation percentage and severity banding
//
// percentage = spent / limit * 100, never clamped for the label.
// Bands: >= 90 critical, >= 75 warning, otherwise normal.
// "Near limit" is the critical band and nothing else.

use crate::entities::Budget;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CRITICAL_THRESHOLD: f64 = 90.0;
pub const WARNING_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetError {
    #[error("budget {id}: limit must be a positive number, got {limit}")]
    InvalidLimit { id: String, limit: f64 },

    #[error("budget {id}: spent must be a non-negative number, got {spent}")]
    InvalidSpent { id: String, spent: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= CRITICAL_THRESHOLD {
            Severity::Critical
        } else if percentage >= WARNING_THRESHOLD {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// Exact percentage, may exceed 100
    pub percentage: f64,

    /// Percentage rounded for the label
    pub display_percentage: i64,

    pub severity: Severity,
    pub near_limit: bool,

    /// Progress bar fill in [0, 1]
    pub bar_ratio: f64,
}

impl Budget {
    pub fn percentage(&self) -> Result<f64, BudgetError> {
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(BudgetError::InvalidLimit {
                id: self.id.clone(),
                limit: self.limit,
            });
        }
        if !self.spent.is_finite() || self.spent < 0.0 {
            return Err(BudgetError::InvalidSpent {
                id: self.id.clone(),
                spent: self.spent,
            });
        }

        Ok(self.spent * 100.0 / self.limit)
    }

    pub fn progress(&self) -> Result<BudgetProgress, BudgetError> {
        let percentage = self.percentage()?;
        let severity = Severity::classify(percentage);

        Ok(BudgetProgress {
            percentage,
            display_percentage: percentage.round() as i64,
            severity,
            near_limit: severity == Severity::Critical,
            bar_ratio: (percentage / 100.0).clamp(0.0, 1.0),
        })
    }
}

/// Totals across a set of budgets for the page header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub total_limit: f64,
    pub total_spent: f64,
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,

    /// Budgets whose progress could not be computed
    pub invalid: usize,
}

impl BudgetOverview {
    pub fn from_budgets(budgets: &[Budget]) -> Self {
        let mut overview = BudgetOverview::default();

        for budget in budgets {
            match budget.progress() {
                Ok(progress) => {
                    overview.total_limit += budget.limit;
                    overview.total_spent += budget.spent;
                    match progress.severity {
                        Severity::Normal => overview.normal += 1,
                        Severity::Warning => overview.warning += 1,
                        Severity::Critical => overview.critical += 1,
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping invalid budget in overview");
                    overview.invalid += 1;
                }
            }
        }

        overview
    }

    pub fn remaining(&self) -> f64 {
        self.total_limit - self.total_spent
    }
}
