// Small building blocks shared by every page: colours and the titled card

use finsight::progress::Severity;
use finsight::settings::Theme;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub background: Color,
    pub income: Color,
    pub expense: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight: Color::Yellow,
                background: Color::Reset,
                income: Color::Green,
                expense: Color::Red,
            },
            Theme::Light => Palette {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight: Color::Magenta,
                background: Color::White,
                income: Color::Green,
                expense: Color::Red,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn amount(&self, amount: f64) -> Style {
        if amount >= 0.0 {
            Style::default().fg(self.income)
        } else {
            Style::default().fg(self.expense)
        }
    }

    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Normal => Style::default().fg(Color::Green),
            Severity::Warning => Style::default().fg(Color::Yellow),
            Severity::Critical => Style::default().fg(Color::Red),
        }
    }
}

/// Titled bordered container
pub fn card(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .title(Span::styled(format!(" {} ", title), palette.heading()))
        .style(palette.base())
}

/// Same card with an accent border, for the focused element
pub fn focused_card(title: &str, palette: &Palette) -> Block<'static> {
    card(title, palette).border_style(Style::default().fg(palette.accent))
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Netflix Subscription", 10), "Netflix...");
        assert_eq!(truncate("Rent", 10), "Rent");
        assert_eq!(truncate("Café crème brûlée", 8), "Café ...");
    }

    #[test]
    fn test_palette_follows_theme() {
        assert_ne!(
            Palette::for_theme(Theme::Dark).text,
            Palette::for_theme(Theme::Light).text
        );
    }
}
