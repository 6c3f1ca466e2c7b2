// 💳 Transaction Entity - a single signed money movement
//
// The `transaction_type` is redundant with the sign of `amount` and the two
// must always agree: income is positive, expenses are negative. A zero
// amount is accepted for either type.

use super::EntityError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date layout used for CSV cells and stored literals
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,

    /// Money going out
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Type implied by the sign of an amount (zero counts as an expense)
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// Whether `amount` has a sign this type allows
    pub fn agrees_with(&self, amount: f64) -> bool {
        match self {
            TransactionType::Income => amount >= 0.0,
            TransactionType::Expense => amount <= 0.0,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Create a transaction whose type is derived from the amount sign
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Transaction {
            id: id.into(),
            description: description.into(),
            amount,
            category: category.into(),
            date,
            transaction_type: TransactionType::from_amount(amount),
        }
    }

    /// Create a transaction with an explicit type, rejecting a sign mismatch
    pub fn with_type(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        transaction_type: TransactionType,
    ) -> Result<Self, EntityError> {
        let id = id.into();

        if !amount.is_finite() {
            return Err(EntityError::InvalidAmount { id, amount });
        }

        if !transaction_type.agrees_with(amount) {
            return Err(EntityError::TypeMismatch {
                id,
                amount,
                transaction_type,
            });
        }

        Ok(Transaction {
            id,
            description: description.into(),
            amount,
            category: category.into(),
            date,
            transaction_type,
        })
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

// ============================================================================
// RAW TRANSACTION (as read from CSV, before validation)
// ============================================================================

/// Untyped CSV row. Dates and types stay as text until `TryFrom` validates them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(rename = "type", default)]
    pub transaction_type: String,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = EntityError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let id = if raw.id.trim().is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            raw.id
        };

        let date = NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT).map_err(|_| {
            EntityError::InvalidDate {
                id: id.clone(),
                value: raw.date.clone(),
            }
        })?;

        // A missing type column falls back to the amount sign
        let transaction_type = if raw.transaction_type.trim().is_empty() {
            TransactionType::from_amount(raw.amount)
        } else {
            TransactionType::parse(&raw.transaction_type).ok_or_else(|| {
                EntityError::UnknownType {
                    id: id.clone(),
                    value: raw.transaction_type.clone(),
                }
            })?
        };

        Transaction::with_type(
            id,
            raw.description,
            raw.amount,
            raw.category,
            date,
            transaction_type,
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn raw(id: &str, amount: f64, date: &str, kind: &str) -> RawTransaction {
        RawTransaction {
            id: id.to_string(),
            description: "Gas Station".to_string(),
            amount,
            category: "Transportation".to_string(),
            date: date.to_string(),
            transaction_type: kind.to_string(),
        }
    }

    #[test]
    fn test_type_follows_amount_sign() {
        let expense = Transaction::new("1", "Grocery Shopping", -120.0, "Food", date("2024-02-20"));
        let income = Transaction::new("2", "Salary Deposit", 3500.0, "Income", date("2024-02-19"));

        assert!(expense.is_expense());
        assert!(income.is_income());
    }

    #[test]
    fn test_with_type_rejects_sign_mismatch() {
        let result = Transaction::with_type(
            "9",
            "Refund",
            25.0,
            "Shopping",
            date("2024-02-10"),
            TransactionType::Expense,
        );

        assert!(matches!(result, Err(EntityError::TypeMismatch { .. })));
    }

    #[test]
    fn test_zero_amount_accepts_either_type() {
        for kind in TransactionType::ALL {
            let tx = Transaction::with_type("0", "Adjustment", 0.0, "Other", date("2024-01-01"), kind);
            assert!(tx.is_ok());
        }
    }

    #[test]
    fn test_raw_conversion() {
        let tx = Transaction::try_from(raw("4", -45.0, "2024-02-17", "expense")).unwrap();

        assert_eq!(tx.id, "4");
        assert_eq!(tx.date, date("2024-02-17"));
        assert_eq!(tx.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_raw_malformed_date_is_rejected() {
        let result = Transaction::try_from(raw("4", -45.0, "17/02/2024", "expense"));
        assert!(matches!(result, Err(EntityError::InvalidDate { .. })));
    }

    #[test]
    fn test_raw_missing_id_and_type_are_filled() {
        let tx = Transaction::try_from(raw("", 800.0, "2024-02-16", "")).unwrap();

        assert!(!tx.id.is_empty());
        assert_eq!(tx.transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_type_parse_is_case_insensitive() {
        assert_eq!(TransactionType::parse("Income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse(" EXPENSE "), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("transfer"), None);
    }
}
