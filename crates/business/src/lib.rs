//! # Bankist Business
//!
//! Business logic layer - session countdown and the ledger operations
//! (login, transfer, loan, closure, sort) behind the [`Bank`] controller.

pub mod bank;
pub mod error;
pub mod event;
pub mod ledger;
pub mod loan;
pub mod session;

pub use bank::{Bank, BankSettings};
pub use error::{BankError, BankResult, LoanRejection, TransferRejection};
pub use event::{BankEvent, LogoutReason};
pub use loan::PendingLoan;
pub use session::{Session, SessionState, Tick};
