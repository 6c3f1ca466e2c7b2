// 🧩 Root controller - owns the dataset, the preferences and the active page
//
// The active page carries its own state. Navigating away drops it; coming
// back starts from a fresh state.

use crate::dataset::Dataset;
use crate::navigation::{NavPanel, Page};
use crate::pages::{
    AnalyticsMsg, AnalyticsState, BudgetMsg, BudgetState, DashboardMsg, DashboardState,
    PageContext, SettingsMsg, SettingsState, TransactionsMsg, TransactionsState,
};
use crate::settings::Preferences;
use chrono::NaiveDate;
use std::path::PathBuf;

/// The page on screen together with its private state
#[derive(Debug, Clone, PartialEq)]
pub enum ActivePage {
    Dashboard(DashboardState),
    Transactions(TransactionsState),
    Budget(BudgetState),
    Analytics(AnalyticsState),
    Settings(SettingsState),
}

impl ActivePage {
    /// Fresh state for `page`
    pub fn open(page: Page, ctx: &PageContext) -> Self {
        match page {
            Page::Dashboard => ActivePage::Dashboard(DashboardState::default()),
            Page::Transactions => ActivePage::Transactions(TransactionsState::new(ctx)),
            Page::Budget => ActivePage::Budget(BudgetState::new(ctx)),
            Page::Analytics => ActivePage::Analytics(AnalyticsState::new(ctx)),
            Page::Settings => ActivePage::Settings(SettingsState::new(ctx)),
        }
    }

    pub fn page(&self) -> Page {
        match self {
            ActivePage::Dashboard(_) => Page::Dashboard,
            ActivePage::Transactions(_) => Page::Transactions,
            ActivePage::Budget(_) => Page::Budget,
            ActivePage::Analytics(_) => Page::Analytics,
            ActivePage::Settings(_) => Page::Settings,
        }
    }
}

impl Default for ActivePage {
    fn default() -> Self {
        ActivePage::Dashboard(DashboardState::default())
    }
}

/// A message addressed to one page
#[derive(Debug, Clone, PartialEq)]
pub enum PageMsg {
    Dashboard(DashboardMsg),
    Transactions(TransactionsMsg),
    Budget(BudgetMsg),
    Analytics(AnalyticsMsg),
    Settings(SettingsMsg),
}

impl PageMsg {
    pub fn page(&self) -> Page {
        match self {
            PageMsg::Dashboard(_) => Page::Dashboard,
            PageMsg::Transactions(_) => Page::Transactions,
            PageMsg::Budget(_) => Page::Budget,
            PageMsg::Analytics(_) => Page::Analytics,
            PageMsg::Settings(_) => Page::Settings,
        }
    }
}

pub struct App {
    pub dataset: Dataset,
    pub preferences: Preferences,
    pub export_dir: PathBuf,

    /// Calendar date for export file names
    pub today: NaiveDate,

    active: ActivePage,
    pub should_quit: bool,
}

impl App {
    pub fn new(dataset: Dataset, preferences: Preferences, export_dir: impl Into<PathBuf>) -> Self {
        let today = chrono::Local::now().date_naive();
        Self::with_today(dataset, preferences, export_dir, today)
    }

    pub fn with_today(
        dataset: Dataset,
        preferences: Preferences,
        export_dir: impl Into<PathBuf>,
        today: NaiveDate,
    ) -> Self {
        App {
            dataset,
            preferences,
            export_dir: export_dir.into(),
            today,
            active: ActivePage::default(),
            should_quit: false,
        }
    }

    pub fn context(&self) -> PageContext<'_> {
        PageContext {
            dataset: &self.dataset,
            preferences: self.preferences,
            export_dir: &self.export_dir,
            today: self.today,
        }
    }

    pub fn active(&self) -> &ActivePage {
        &self.active
    }

    pub fn current_page(&self) -> Page {
        self.active.page()
    }

    pub fn nav_panel(&self) -> NavPanel {
        NavPanel::new(self.current_page())
    }

    /// Show `page`. Any other page's state is discarded.
    pub fn navigate(&mut self, page: Page) {
        if page == self.current_page() {
            return;
        }

        tracing::info!(from = self.current_page().id(), to = page.id(), "Navigate");
        let next = ActivePage::open(page, &self.context());
        self.active = next;
    }

    /// Let the side panel pick `page` and follow its choice
    pub fn select_page(&mut self, page: Page) {
        let panel = self.nav_panel();
        panel.select(page, |selected| self.navigate(selected));
    }

    pub fn next_page(&mut self) {
        let panel = self.nav_panel();
        panel.select_next(|page| self.navigate(page));
    }

    pub fn previous_page(&mut self) {
        let panel = self.nav_panel();
        panel.select_previous(|page| self.navigate(page));
    }

    /// Route a message to the active page. Messages for other pages are dropped.
    pub fn update(&mut self, msg: PageMsg) {
        if msg.page() != self.current_page() {
            tracing::debug!(
                target_page = msg.page().id(),
                current = self.current_page().id(),
                "Dropping message for inactive page"
            );
            return;
        }

        let ctx = PageContext {
            dataset: &self.dataset,
            preferences: self.preferences,
            export_dir: &self.export_dir,
            today: self.today,
        };

        self.active = match (std::mem::take(&mut self.active), msg) {
            (ActivePage::Dashboard(state), PageMsg::Dashboard(msg)) => {
                ActivePage::Dashboard(state.update(msg, &ctx))
            }
            (ActivePage::Transactions(state), PageMsg::Transactions(msg)) => {
                ActivePage::Transactions(state.update(msg, &ctx))
            }
            (ActivePage::Budget(state), PageMsg::Budget(msg)) => {
                ActivePage::Budget(state.update(msg, &ctx))
            }
            (ActivePage::Analytics(state), PageMsg::Analytics(msg)) => {
                ActivePage::Analytics(state.update(msg, &ctx))
            }
            (ActivePage::Settings(state), PageMsg::Settings(msg)) => {
                let mut state = state.update(msg, &ctx);
                if let Some(saved) = state.take_saved() {
                    self.preferences = saved;
                }
                ActivePage::Settings(state)
            }
            (active, _) => active,
        };
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
