// 🎯 Budget Entity - spending cap for one category
//
// Utilisation math lives in `crate::progress`; this file only holds the shape.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,

    /// Spending cap, expected to be positive
    pub limit: f64,

    /// Amount spent so far, expected to be non-negative
    pub spent: f64,

    /// Recurring budgets reset every month
    pub recurring: bool,
}

impl Budget {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        limit: f64,
        spent: f64,
        recurring: bool,
    ) -> Self {
        Budget {
            id: id.into(),
            category: category.into(),
            limit,
            spent,
            recurring,
        }
    }

    /// Only recurring budgets have a period; one-time budgets return `None`
    pub fn period(&self) -> Option<BudgetPeriod> {
        self.recurring.then_some(BudgetPeriod::Monthly)
    }

    pub fn kind_label(&self) -> &'static str {
        match self.period() {
            Some(BudgetPeriod::Monthly) => "Monthly Budget",
            None => "One-time Budget",
        }
    }

    /// Limit minus spent. Negative once the budget is exceeded.
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }
}
