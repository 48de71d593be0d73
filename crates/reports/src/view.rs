//! Account dashboard view model
//!
//! Everything the dashboard shows for the logged-in account: balance,
//! movement rows and the in/out/interest summary.

use crate::format::{format_currency, format_movement_date};
use bankist_core::{Account, Movement};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    /// Anything not strictly positive renders as a withdrawal
    pub fn of(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            MovementKind::Deposit
        } else {
            MovementKind::Withdrawal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }
}

/// One rendered movement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementRow {
    /// 1-based position in the displayed sequence
    pub number: usize,
    pub kind: MovementKind,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub display_date: String,
    pub formatted_amount: String,
}

impl MovementRow {
    fn new(number: usize, movement: &Movement, account: &Account, now: DateTime<Utc>) -> Self {
        Self {
            number,
            kind: MovementKind::of(movement.amount),
            amount: movement.amount,
            date: movement.date,
            display_date: format_movement_date(movement.date, now, &account.locale),
            formatted_amount: format_currency(movement.amount, &account.locale, &account.currency),
        }
    }
}

/// Deposits, withdrawals and interest earned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub incomes: Decimal,
    pub outflows: Decimal,
    pub interest: Decimal,
    pub formatted_incomes: String,
    pub formatted_outflows: String,
    pub formatted_interest: String,
}

impl Summary {
    pub fn of(account: &Account) -> Self {
        let incomes = account.deposits_total();
        let outflows = account.withdrawals_total();
        let interest = account.interest_total();
        let fmt = |value| format_currency(value, &account.locale, &account.currency);

        Self {
            incomes,
            outflows,
            interest,
            formatted_incomes: fmt(incomes),
            formatted_outflows: fmt(outflows),
            formatted_interest: fmt(interest),
        }
    }
}

/// Dashboard snapshot of a single account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub owner: String,
    pub username: String,
    pub currency: String,
    pub locale: String,
    pub balance: Decimal,
    pub formatted_balance: String,
    pub sorted: bool,
    /// Newest first, like the dashboard list
    pub rows: Vec<MovementRow>,
    pub summary: Summary,
}

impl AccountView {
    /// Build the view. `sorted` orders rows by amount without touching the account.
    pub fn build(account: &Account, sorted: bool, now: DateTime<Utc>) -> Self {
        let ordered: Vec<&Movement> = if sorted {
            account.sorted_entries()
        } else {
            account.entries().iter().collect()
        };

        let mut rows: Vec<MovementRow> = ordered
            .into_iter()
            .enumerate()
            .map(|(index, movement)| MovementRow::new(index + 1, movement, account, now))
            .collect();
        rows.reverse();

        let balance = account.balance();
        Self {
            owner: account.owner.clone(),
            username: account.username.clone(),
            currency: account.currency.code.clone(),
            locale: account.locale.clone(),
            balance,
            formatted_balance: format_currency(balance, &account.locale, &account.currency),
            sorted,
            rows,
            summary: Summary::of(account),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
