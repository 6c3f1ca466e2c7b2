// Page views
//
// Every page owns a private state object. `update(state, msg, ctx)` consumes
// the old state and returns the new one; nothing is shared between pages and
// the root controller drops a page's state when it navigates away.

pub mod analytics;
pub mod budget;
pub mod dashboard;
pub mod settings;
pub mod transactions;

pub use analytics::{AnalyticsMsg, AnalyticsState, AnalyticsView};
pub use budget::{BudgetMsg, BudgetRow, BudgetState};
pub use dashboard::{DashboardMsg, DashboardState, DashboardView, RecentTransaction, SummaryCard};
pub use settings::{SettingsField, SettingsMsg, SettingsState};
pub use transactions::{FilterOption, TransactionsMsg, TransactionsState};

use crate::dataset::Dataset;
use crate::settings::Preferences;
use chrono::NaiveDate;
use std::path::Path;

/// Read-only inputs a page needs while handling a message or rendering
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub dataset: &'a Dataset,
    pub preferences: Preferences,

    /// Where exports are written
    pub export_dir: &'a Path,

    /// Calendar date used for export file names
    pub today: NaiveDate,
}

/// One-line feedback shown under a page (export results, saves)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Wrapping cursor step over a list of `len` rows
pub(crate) fn step_cursor(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match current {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    Some(next)
}
