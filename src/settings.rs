// ⚙️ Display preferences - currency, date format, theme
//
// Preferences only change how values are shown. They are never written
// back to disk; the config file supplies the starting values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CURRENCY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Jpy];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn next(&self) -> Self {
        cycle(&Currency::ALL, self, 1)
    }

    pub fn previous(&self) -> Self {
        cycle(&Currency::ALL, self, -1)
    }

    fn decimals(&self) -> usize {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// `-$1,234.50`; yen has no minor unit
    pub fn format_amount(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        let fixed = format!("{:.*}", self.decimals(), amount.abs());

        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
            None => (fixed, None),
        };

        let mut grouped = String::new();
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        match fraction {
            Some(fraction) => format!("{}{}{}.{}", sign, self.symbol(), grouped, fraction),
            None => format!("{}{}{}", sign, self.symbol(), grouped),
        }
    }

    /// Like `format_amount` with an explicit `+` on positive values
    pub fn format_signed(&self, amount: f64) -> String {
        if amount > 0.0 {
            format!("+{}", self.format_amount(amount))
        } else {
            self.format_amount(amount)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.symbol(), self.name())
    }
}

// ============================================================================
// DATE FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

impl DateFormat {
    pub const ALL: [DateFormat; 3] = [
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::Iso,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
            DateFormat::Iso => "YYYY-MM-DD",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::Iso => "%Y-%m-%d",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        DateFormat::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    pub fn next(&self) -> Self {
        cycle(&DateFormat::ALL, self, 1)
    }

    pub fn previous(&self) -> Self {
        cycle(&DateFormat::ALL, self, -1)
    }
}

// ============================================================================
// THEME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark Theme",
            Theme::Light => "Light Theme",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

// ============================================================================
// PREFERENCES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub currency: Currency,
    pub date_format: DateFormat,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            currency: Currency::Usd,
            date_format: DateFormat::MonthDayYear,
            theme: Theme::Dark,
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: &T, step: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|item| item == current).unwrap_or(0) as isize;
    all[(index + step).rem_euclid(len) as usize]
}
