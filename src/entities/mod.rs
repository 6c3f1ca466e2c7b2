// Entity Models - plain records shared by every page
//
// Transaction, Budget and User are immutable once built. Pages only ever
// hold local view state on top of them.

pub mod budget;
pub mod transaction;
pub mod user;

pub use budget::{Budget, BudgetPeriod};
pub use transaction::{RawTransaction, Transaction, TransactionType, DATE_FORMAT};
pub use user::User;

/// Errors raised while building entities from untrusted input
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("transaction {id}: amount {amount} does not match type '{transaction_type}'")]
    TypeMismatch {
        id: String,
        amount: f64,
        transaction_type: TransactionType,
    },

    #[error("transaction {id}: amount {amount} is not a finite number")]
    InvalidAmount { id: String, amount: f64 },

    #[error("transaction {id}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { id: String, value: String },

    #[error("transaction {id}: unknown type '{value}'")]
    UnknownType { id: String, value: String },
}
