// 🎯 Budget page - one progress bar per budget plus an overview header

use super::{step_cursor, PageContext};
use crate::entities::Budget;
use crate::progress::{BudgetError, BudgetOverview, BudgetProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetMsg {
    SelectNext,
    SelectPrevious,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetState {
    pub selected: Option<usize>,
}

/// A budget with its computed progress, or the reason it has none
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    pub budget: Budget,
    pub progress: Result<BudgetProgress, BudgetError>,
}

impl BudgetState {
    pub fn new(ctx: &PageContext) -> Self {
        BudgetState {
            selected: (!ctx.dataset.budgets.is_empty()).then_some(0),
        }
    }

    pub fn update(self, msg: BudgetMsg, ctx: &PageContext) -> Self {
        let len = ctx.dataset.budgets.len();
        let selected = match msg {
            BudgetMsg::SelectNext => step_cursor(self.selected, len, true),
            BudgetMsg::SelectPrevious => step_cursor(self.selected, len, false),
        };
        BudgetState { selected }
    }

    pub fn rows(ctx: &PageContext) -> Vec<BudgetRow> {
        ctx.dataset
            .budgets
            .iter()
            .map(|budget| BudgetRow {
                budget: budget.clone(),
                progress: budget.progress(),
            })
            .collect()
    }

    pub fn overview(ctx: &PageContext) -> BudgetOverview {
        BudgetOverview::from_budgets(&ctx.dataset.budgets)
    }
}
