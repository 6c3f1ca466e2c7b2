// FinSight - Core Library
// Exposes all modules for use in the CLI, the terminal UI and tests

pub mod entities;   // Transaction, Budget, User records
pub mod dataset;    // Seed data for every page
pub mod filter;     // Transaction search, filter and sort
pub mod forecast;   // Least-squares expense forecast
pub mod progress;   // Budget utilisation banding
pub mod analytics;  // Chart series and cash flow totals
pub mod settings;   // Currency, date format, theme
pub mod export;     // CSV and PDF export
pub mod navigation; // Page identifiers and the side panel
pub mod pages;      // Per-page state and update functions
pub mod app;        // Root controller
pub mod report;     // Headless summary
pub mod config;     // TOML config + env overrides

// Re-export commonly used types
pub use entities::{
    Budget, BudgetPeriod, EntityError, Transaction, TransactionType, User,
};
pub use dataset::{Bill, Dataset};
pub use filter::{SortDirection, SortField, SortState, TransactionFilter};
pub use forecast::{forecast_expenses, linear_fit, Forecast, ForecastError, LinearFit, Trend};
pub use progress::{BudgetError, BudgetOverview, BudgetProgress, Severity};
pub use analytics::{CashFlow, DateRange, MonthlySummary, SeriesPoint};
pub use settings::{Currency, DateFormat, Preferences, Theme};
pub use export::{ExportError, ExportFormat};
pub use navigation::{NavPanel, Page};
pub use app::{ActivePage, App, PageMsg};
pub use report::SummaryReport;
pub use config::{Config, ConfigError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
