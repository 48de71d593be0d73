//! Business layer errors
//!
//! Every rejection is local and non-fatal: the caller shows it and the user
//! may resubmit. Nothing is mutated when one of these is returned.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a transfer was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferRejection {
    #[error("receiver {0} does not exist")]
    UnknownReceiver(String),

    #[error("cannot transfer to your own account")]
    SelfTransfer,

    #[error("amount must be positive: {0}")]
    NonPositiveAmount(Decimal),

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    #[error("amount {0} would push an account past the supported range")]
    LimitExceeded(Decimal),
}

/// Why a loan was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanRejection {
    #[error("amount must be positive: {0}")]
    NonPositiveAmount(Decimal),

    #[error("no deposit of at least {required} on record")]
    NoQualifyingDeposit { required: Decimal },

    #[error("amount {0} would push the balance past the supported range")]
    LimitExceeded(Decimal),
}

/// Banking operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("Login failed: check your credentials")]
    InvalidCredentials,

    #[error("Transfer rejected: {0}")]
    TransferRejected(#[from] TransferRejection),

    #[error("Loan rejected: {0}")]
    LoanRejected(#[from] LoanRejection),

    #[error("Account closure rejected: username or PIN does not match")]
    ClosureRejected,

    #[error("No active session")]
    NotLoggedIn,
}

/// Result type alias for banking operations
pub type BankResult<T> = Result<T, BankError>;

impl BankError {
    /// Short label of the dashboard area that shows this error
    pub fn area(&self) -> &'static str {
        match self {
            BankError::InvalidCredentials | BankError::NotLoggedIn => "login",
            BankError::TransferRejected(_) => "transfer",
            BankError::LoanRejected(_) => "loan",
            BankError::ClosureRejected => "close",
        }
    }
}
