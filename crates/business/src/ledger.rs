//! Ledger operations on the account store
//!
//! Pure checks and mutations, no session or timer involved. Every function
//! validates all preconditions before touching the store, so a rejected
//! call leaves every account exactly as it was.

use crate::error::{LoanRejection, TransferRejection};
use bankist_core::{Account, AccountStore};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Find the account for `username` if `pin` matches
pub fn authenticate<'a>(store: &'a AccountStore, username: &str, pin: u32) -> Option<&'a Account> {
    store
        .find_by_username(username)
        .filter(|account| account.pin_matches(pin))
}

/// Move `amount` from `from` to `to`, stamping both sides with `at`.
///
/// Checks, in order: receiver exists, receiver is not the sender, amount is
/// positive, amount is covered by the sender's balance, both accounts can
/// record the movement without leaving the decimal range.
pub fn transfer(
    store: &mut AccountStore,
    from: &str,
    to: &str,
    amount: Decimal,
    at: DateTime<Utc>,
) -> Result<(), TransferRejection> {
    if !store.contains(to) {
        return Err(TransferRejection::UnknownReceiver(to.to_string()));
    }
    if from == to {
        return Err(TransferRejection::SelfTransfer);
    }
    if amount <= Decimal::ZERO {
        return Err(TransferRejection::NonPositiveAmount(amount));
    }

    let (sender, receiver) = store
        .pair_mut(from, to)
        .ok_or_else(|| TransferRejection::UnknownReceiver(to.to_string()))?;

    let available = sender.balance();
    if amount > available {
        return Err(TransferRejection::InsufficientBalance {
            needed: amount,
            available,
        });
    }
    if !sender.can_record([-amount]) || !receiver.can_record([amount]) {
        return Err(TransferRejection::LimitExceeded(amount));
    }

    sender.push_movement(-amount, at);
    receiver.push_movement(amount, at);
    Ok(())
}

/// Approve a loan request and return the amount that will be credited.
///
/// The request is floored to whole units. It is approved when some movement
/// on the account is at least `ratio` times that amount, and when the
/// balance still fits after this loan and the `pending` ones have landed.
pub fn approve_loan(
    account: &Account,
    requested: Decimal,
    ratio: Decimal,
    pending: &[Decimal],
) -> Result<Decimal, LoanRejection> {
    let amount = requested.floor();
    if amount <= Decimal::ZERO {
        return Err(LoanRejection::NonPositiveAmount(amount));
    }

    let required = amount
        .checked_mul(ratio)
        .ok_or(LoanRejection::LimitExceeded(amount))?;
    if !account.has_movement_at_least(required) {
        return Err(LoanRejection::NoQualifyingDeposit { required });
    }

    let landing = pending.iter().copied().chain(std::iter::once(amount));
    if !account.can_record(landing) {
        return Err(LoanRejection::LimitExceeded(amount));
    }

    Ok(amount)
}

/// Closure needs both username and PIN of the current account
pub fn closure_matches(current: &Account, username: &str, pin: u32) -> bool {
    current.username == username && current.pin_matches(pin)
}
