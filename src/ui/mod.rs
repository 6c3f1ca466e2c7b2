// Terminal UI - event loop and key bindings
//
// Keys become `Action`s; the root controller applies them. Rendering lives in
// `render`, chart wrappers in `charts`.

mod charts;
mod render;
mod widgets;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use finsight::app::{ActivePage, App, PageMsg};
use finsight::filter::SortField;
use finsight::navigation::Page;
use finsight::pages::{AnalyticsMsg, BudgetMsg, DashboardMsg, SettingsMsg, TransactionsMsg};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextPage,
    PreviousPage,
    Goto(Page),
    Page(PageMsg),
    Ignore,
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "UI loop failed");
    }

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            apply(app, map_key(app, key));
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn apply(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.quit(),
        Action::NextPage => app.next_page(),
        Action::PreviousPage => app.previous_page(),
        Action::Goto(page) => app.select_page(page),
        Action::Page(msg) => app.update(msg),
        Action::Ignore => {}
    }
}

pub fn map_key(app: &App, key: KeyEvent) -> Action {
    // The search box swallows every key except its exits
    if let ActivePage::Transactions(state) = app.active() {
        if state.searching {
            let msg = match key.code {
                KeyCode::Enter | KeyCode::Esc => TransactionsMsg::EndSearch,
                KeyCode::Backspace => TransactionsMsg::SearchBackspace,
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    TransactionsMsg::SearchInput(ch)
                }
                _ => return Action::Ignore,
            };
            return Action::Page(PageMsg::Transactions(msg));
        }
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit
        }
        KeyCode::Tab => return Action::NextPage,
        KeyCode::BackTab => return Action::PreviousPage,
        KeyCode::F(n @ 1..=5) => return Action::Goto(Page::ALL[usize::from(n) - 1]),
        _ => {}
    }

    let msg = match app.active() {
        ActivePage::Dashboard(_) => dashboard_key(key.code).map(PageMsg::Dashboard),
        ActivePage::Transactions(state) => {
            transactions_key(key.code, state.show_filters).map(PageMsg::Transactions)
        }
        ActivePage::Budget(_) => budget_key(key.code).map(PageMsg::Budget),
        ActivePage::Analytics(_) => analytics_key(key.code).map(PageMsg::Analytics),
        ActivePage::Settings(_) => settings_key(key.code).map(PageMsg::Settings),
    };

    msg.map(Action::Page).unwrap_or(Action::Ignore)
}

fn dashboard_key(code: KeyCode) -> Option<DashboardMsg> {
    match code {
        KeyCode::Down | KeyCode::Char('j') => Some(DashboardMsg::NextRecent),
        KeyCode::Up | KeyCode::Char('k') => Some(DashboardMsg::PreviousRecent),
        _ => None,
    }
}

fn transactions_key(code: KeyCode, filters_open: bool) -> Option<TransactionsMsg> {
    if filters_open {
        let msg = match code {
            KeyCode::Down | KeyCode::Char('j') => Some(TransactionsMsg::FilterCursorDown),
            KeyCode::Up | KeyCode::Char('k') => Some(TransactionsMsg::FilterCursorUp),
            KeyCode::Char(' ') | KeyCode::Enter => Some(TransactionsMsg::ToggleAtCursor),
            KeyCode::Left | KeyCode::Char('h') => Some(TransactionsMsg::ShiftDateAtCursor(-1)),
            KeyCode::Right | KeyCode::Char('l') => Some(TransactionsMsg::ShiftDateAtCursor(1)),
            KeyCode::Delete | KeyCode::Backspace => Some(TransactionsMsg::ClearDateAtCursor),
            _ => None,
        };
        if msg.is_some() {
            return msg;
        }
    }

    match code {
        KeyCode::Char('/') => Some(TransactionsMsg::BeginSearch),
        KeyCode::Char('f') => Some(TransactionsMsg::ToggleFilters),
        KeyCode::Char('c') => Some(TransactionsMsg::ClearFilters),
        KeyCode::Char('d') => Some(TransactionsMsg::Sort(SortField::Date)),
        KeyCode::Char('n') => Some(TransactionsMsg::Sort(SortField::Description)),
        KeyCode::Char('g') => Some(TransactionsMsg::Sort(SortField::Category)),
        KeyCode::Char('a') => Some(TransactionsMsg::Sort(SortField::Amount)),
        KeyCode::Char('e') => Some(TransactionsMsg::ExportCsv),
        KeyCode::Down | KeyCode::Char('j') => Some(TransactionsMsg::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(TransactionsMsg::SelectPrevious),
        _ => None,
    }
}

fn budget_key(code: KeyCode) -> Option<BudgetMsg> {
    match code {
        KeyCode::Down | KeyCode::Char('j') => Some(BudgetMsg::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(BudgetMsg::SelectPrevious),
        _ => None,
    }
}

fn analytics_key(code: KeyCode) -> Option<AnalyticsMsg> {
    match code {
        KeyCode::Char('v') => Some(AnalyticsMsg::ToggleView),
        KeyCode::Char('1') => Some(AnalyticsMsg::ShowCharts),
        KeyCode::Char('2') => Some(AnalyticsMsg::ShowPredictions),
        KeyCode::Char('[') => Some(AnalyticsMsg::ShiftStart(-1)),
        KeyCode::Char(']') => Some(AnalyticsMsg::ShiftStart(1)),
        KeyCode::Char('{') => Some(AnalyticsMsg::ShiftEnd(-1)),
        KeyCode::Char('}') => Some(AnalyticsMsg::ShiftEnd(1)),
        KeyCode::Char('r') => Some(AnalyticsMsg::ResetRange),
        _ => None,
    }
}

fn settings_key(code: KeyCode) -> Option<SettingsMsg> {
    match code {
        KeyCode::Down | KeyCode::Char('j') => Some(SettingsMsg::CursorDown),
        KeyCode::Up | KeyCode::Char('k') => Some(SettingsMsg::CursorUp),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => Some(SettingsMsg::CycleNext),
        KeyCode::Left | KeyCode::Char('h') => Some(SettingsMsg::CyclePrevious),
        KeyCode::Char('t') => Some(SettingsMsg::ToggleTheme),
        KeyCode::Char('s') => Some(SettingsMsg::Save),
        KeyCode::Char('p') => Some(SettingsMsg::ExportPdf),
        KeyCode::Char('e') => Some(SettingsMsg::ExportCsv),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finsight::{Dataset, Preferences, Theme};

    fn app() -> App {
        App::with_today(
            Dataset::sample(),
            Preferences::default(),
            ".",
            NaiveDate::from_ymd_opt(2024, 2, 21).unwrap(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        let action = map_key(app, KeyEvent::new(code, KeyModifiers::NONE));
        apply(app, action);
    }

    #[test]
    fn test_function_keys_jump_to_pages() {
        let mut app = app();
        press(&mut app, KeyCode::F(4));
        assert_eq!(app.current_page(), Page::Analytics);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_page(), Page::Budget);
    }

    #[test]
    fn test_q_types_into_search_instead_of_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);

        match app.active() {
            ActivePage::Transactions(state) => assert_eq!(state.filter.search, "q"),
            other => panic!("unexpected page {:?}", other.page()),
        }

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_settings_keys_save_theme() {
        let mut app = app();
        press(&mut app, KeyCode::F(5));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.preferences.theme, Theme::Dark);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.preferences.theme, Theme::Light);
    }

    #[test]
    fn test_filter_panel_takes_arrow_keys() {
        let mut app = app();
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Down);

        match app.active() {
            ActivePage::Transactions(state) => {
                assert_eq!(state.filter_cursor, 1);
                assert_eq!(state.selected, Some(0));
            }
            other => panic!("unexpected page {:?}", other.page()),
        }
    }
}
