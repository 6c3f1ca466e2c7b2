// ⚙️ Settings page - display preferences and export actions

use super::{PageContext, StatusMessage};
use crate::export;
use crate::settings::Preferences;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsField {
    #[default]
    Currency,
    DateFormat,
    Theme,
}

impl SettingsField {
    pub const ALL: [SettingsField; 3] = [
        SettingsField::Currency,
        SettingsField::DateFormat,
        SettingsField::Theme,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::Currency => "Currency",
            SettingsField::DateFormat => "Date Format",
            SettingsField::Theme => "Theme",
        }
    }

    fn next(&self) -> Self {
        match self {
            SettingsField::Currency => SettingsField::DateFormat,
            SettingsField::DateFormat => SettingsField::Theme,
            SettingsField::Theme => SettingsField::Currency,
        }
    }

    fn previous(&self) -> Self {
        match self {
            SettingsField::Currency => SettingsField::Theme,
            SettingsField::DateFormat => SettingsField::Currency,
            SettingsField::Theme => SettingsField::DateFormat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsMsg {
    CursorUp,
    CursorDown,
    /// Next value for the field under the cursor
    CycleNext,
    /// Previous value for the field under the cursor
    CyclePrevious,
    ToggleTheme,
    Save,
    ExportPdf,
    ExportCsv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState {
    /// Edited values, applied only on save
    pub draft: Preferences,
    pub cursor: SettingsField,
    pub status: Option<StatusMessage>,
    saved: Option<Preferences>,
}

impl SettingsState {
    pub fn new(ctx: &PageContext) -> Self {
        SettingsState {
            draft: ctx.preferences,
            cursor: SettingsField::default(),
            status: None,
            saved: None,
        }
    }

    /// Preferences confirmed by the last save, handed over once
    pub fn take_saved(&mut self) -> Option<Preferences> {
        self.saved.take()
    }

    pub fn update(mut self, msg: SettingsMsg, ctx: &PageContext) -> Self {
        match msg {
            SettingsMsg::CursorUp => self.cursor = self.cursor.previous(),
            SettingsMsg::CursorDown => self.cursor = self.cursor.next(),
            SettingsMsg::CycleNext => self.cycle(true),
            SettingsMsg::CyclePrevious => self.cycle(false),
            SettingsMsg::ToggleTheme => self.draft.theme = self.draft.theme.toggled(),
            SettingsMsg::Save => {
                tracing::info!(
                    currency = self.draft.currency.code(),
                    date_format = self.draft.date_format.label(),
                    theme = self.draft.theme.name(),
                    "Saved display preferences"
                );
                self.saved = Some(self.draft);
                self.status = Some(StatusMessage::info("Settings saved"));
            }
            SettingsMsg::ExportPdf => {
                let result = export::write_pdf(ctx.export_dir, ctx.today, self.draft.date_format);
                self.status = Some(export_status("PDF report", result));
            }
            SettingsMsg::ExportCsv => {
                let result =
                    export::write_csv(ctx.export_dir, &ctx.dataset.transactions, ctx.today);
                self.status = Some(export_status("Transactions", result));
            }
        }
        self
    }

    fn cycle(&mut self, forward: bool) {
        let draft = &mut self.draft;
        match (self.cursor, forward) {
            (SettingsField::Currency, true) => draft.currency = draft.currency.next(),
            (SettingsField::Currency, false) => draft.currency = draft.currency.previous(),
            (SettingsField::DateFormat, true) => draft.date_format = draft.date_format.next(),
            (SettingsField::DateFormat, false) => {
                draft.date_format = draft.date_format.previous()
            }
            (SettingsField::Theme, _) => draft.theme = draft.theme.toggled(),
        }
    }
}

fn export_status(
    what: &str,
    result: Result<std::path::PathBuf, export::ExportError>,
) -> StatusMessage {
    match result {
        Ok(path) => StatusMessage::info(format!("{} exported to {}", what, path.display())),
        Err(e) => {
            tracing::warn!(error = %e, "{} export failed", what);
            StatusMessage::error(format!("Export failed: {}", e))
        }
    }
}
