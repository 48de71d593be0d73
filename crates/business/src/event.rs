//! Presentation events published by the bank controller

use crate::loan::PendingLoan;
use bankist_reports::AccountView;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// Countdown reached zero
    Timeout,
    /// The owner closed the account
    Closed,
    /// Explicit logout (shutdown)
    Requested,
    /// Someone logged in over this session
    Replaced,
}

impl LogoutReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoutReason::Timeout => "timeout",
            LogoutReason::Closed => "closed",
            LogoutReason::Requested => "requested",
            LogoutReason::Replaced => "replaced",
        }
    }
}

/// Everything the dashboard needs to re-render
#[derive(Debug, Clone)]
pub enum BankEvent {
    /// Login succeeded
    LoggedIn { username: String, welcome: String },

    /// Login failed; any previous session is untouched
    LoginFailed,

    /// Current account changed or sort order flipped
    Refresh(AccountView),

    /// Countdown label (`mm:ss`)
    Timer(String),

    /// Header clock in the account's locale
    Clock(String),

    /// Session torn down
    LoggedOut { username: String, reason: LogoutReason },

    /// Loan accepted, movement pending
    LoanRequested(PendingLoan),

    /// Pending loan landed on the account
    LoanApplied {
        id: Uuid,
        username: String,
        amount: Decimal,
    },

    /// Pending loan dropped: its account was closed, or the amount no
    /// longer fits the balance
    LoanCancelled { id: Uuid, username: String },
}

impl BankEvent {
    /// Create a LoggedIn event
    pub fn logged_in(username: &str, first_name: &str) -> Self {
        Self::LoggedIn {
            username: username.to_string(),
            welcome: format!("Welcome back, {}", first_name),
        }
    }

    /// Create a LoggedOut event
    pub fn logged_out(username: &str, reason: LogoutReason) -> Self {
        Self::LoggedOut {
            username: username.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_message() {
        match BankEvent::logged_in("js", "Jonas") {
            BankEvent::LoggedIn { username, welcome } => {
                assert_eq!(username, "js");
                assert_eq!(welcome, "Welcome back, Jonas");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_logout_reason_labels() {
        assert_eq!(LogoutReason::Timeout.as_str(), "timeout");
        assert_eq!(LogoutReason::Closed.as_str(), "closed");
        assert_eq!(LogoutReason::Replaced.as_str(), "replaced");
    }
}
