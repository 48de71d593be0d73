//! Pending loans
//!
//! An approved loan lands on the account after a fixed delay. The pending
//! record is bound to the requesting account, not to the session.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// An approved loan waiting for its movement to be recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingLoan {
    pub id: Uuid,
    pub username: String,
    pub amount: Decimal,
    pub requested_at: DateTime<Utc>,
}

impl PendingLoan {
    pub fn new(username: &str, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            amount,
            requested_at: Utc::now(),
        }
    }
}

/// A pending loan plus the task that will apply it
pub(crate) struct ScheduledLoan {
    pub loan: PendingLoan,
    pub handle: Option<JoinHandle<()>>,
}

impl ScheduledLoan {
    pub fn new(loan: PendingLoan) -> Self {
        Self { loan, handle: None }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
