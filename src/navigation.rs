// 🧭 Navigation - the closed set of pages and the side panel that picks one

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Dashboard,
    Transactions,
    Budget,
    Analytics,
    Settings,
}

impl Page {
    /// Sidebar order
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Transactions,
        Page::Budget,
        Page::Analytics,
        Page::Settings,
    ];

    pub fn next(&self) -> Self {
        match self {
            Page::Dashboard => Page::Transactions,
            Page::Transactions => Page::Budget,
            Page::Budget => Page::Analytics,
            Page::Analytics => Page::Settings,
            Page::Settings => Page::Dashboard,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Dashboard => Page::Settings,
            Page::Transactions => Page::Dashboard,
            Page::Budget => Page::Transactions,
            Page::Analytics => Page::Budget,
            Page::Settings => Page::Analytics,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Transactions => "Transactions",
            Page::Budget => "Budget",
            Page::Analytics => "Analytics",
            Page::Settings => "Settings",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Transactions => "transactions",
            Page::Budget => "budget",
            Page::Analytics => "analytics",
            Page::Settings => "settings",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Page::ALL.into_iter().find(|page| page.id() == id)
    }

    /// Position in the sidebar, also the F-key number minus one
    pub fn index(&self) -> usize {
        Page::ALL.iter().position(|page| page == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub page: Page,
    pub label: &'static str,
    pub active: bool,
}

/// Side panel. It knows the current page and reports selections through a callback.
#[derive(Debug, Clone, Copy)]
pub struct NavPanel {
    current: Page,
}

impl NavPanel {
    pub fn new(current: Page) -> Self {
        NavPanel { current }
    }

    pub fn items(&self) -> Vec<NavItem> {
        Page::ALL
            .iter()
            .map(|page| NavItem {
                page: *page,
                label: page.title(),
                active: *page == self.current,
            })
            .collect()
    }

    /// Report `page` as the new selection
    pub fn select<F: FnMut(Page)>(&self, page: Page, mut on_change: F) {
        on_change(page);
    }

    pub fn select_next<F: FnMut(Page)>(&self, on_change: F) {
        self.select(self.current.next(), on_change);
    }

    pub fn select_previous<F: FnMut(Page)>(&self, on_change: F) {
        self.select(self.current.previous(), on_change);
    }
}
