//! # Account Module
//!
//! Định nghĩa Account và Movement.
//!
//! Mỗi Movement gộp số tiền và thời điểm ghi nhận, nên danh sách
//! movements và danh sách ngày luôn cùng độ dài và cùng thứ tự.

use crate::money::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tạo username từ tên chủ tài khoản: chữ cái đầu của mỗi từ, viết thường.
///
/// # Examples
/// ```
/// use bankist_core::derive_username;
///
/// assert_eq!(derive_username("Jonas Schmedtmann"), "js");
/// assert_eq!(derive_username("  Steven Thomas Williams "), "stw");
/// ```
pub fn derive_username(owner: &str) -> String {
    owner
        .trim()
        .to_lowercase()
        .split_whitespace()
        .filter_map(|name| name.chars().next())
        .collect()
}

/// Một giao dịch: số dương là nạp tiền, số âm là rút tiền.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Số tiền có dấu
    pub amount: Decimal,
    /// Thời điểm ghi nhận
    pub date: DateTime<Utc>,
}

impl Movement {
    /// Tạo Movement mới
    pub fn new(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }

    /// Kiểm tra có phải nạp tiền không
    pub fn is_deposit(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Kiểm tra có phải rút tiền không
    pub fn is_withdrawal(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Tài khoản ngân hàng demo.
///
/// Balance không được lưu, luôn tính lại từ movements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Tên chủ tài khoản
    pub owner: String,
    /// Username suy ra từ owner
    pub username: String,
    movements: Vec<Movement>,
    /// Lãi suất (%)
    pub interest_rate: Decimal,
    /// Mã PIN
    pub pin: u32,
    /// Loại tiền
    pub currency: Currency,
    /// Locale tag (en-US, pt-PT, ...)
    pub locale: String,
}

impl Account {
    /// Tạo Account mới chưa có movement nào
    pub fn new(
        owner: &str,
        interest_rate: Decimal,
        pin: u32,
        currency: Currency,
        locale: &str,
    ) -> Self {
        Self {
            owner: owner.to_string(),
            username: derive_username(owner),
            movements: Vec::new(),
            interest_rate,
            pin,
            currency,
            locale: locale.to_string(),
        }
    }

    /// Gắn danh sách movements ban đầu
    pub fn with_movements(mut self, movements: Vec<Movement>) -> Self {
        self.movements = movements;
        self
    }

    /// Toàn bộ movements theo thứ tự thời gian ghi nhận
    pub fn entries(&self) -> &[Movement] {
        &self.movements
    }

    /// Số tiền của từng movement
    pub fn movements(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.movements.iter().map(|m| m.amount)
    }

    /// Ngày của từng movement, song song với `movements()`
    pub fn movement_dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|m| m.date)
    }

    /// Ghi thêm một movement
    pub fn push_movement(&mut self, amount: Decimal, date: DateTime<Utc>) {
        self.movements.push(Movement::new(amount, date));
    }

    /// Số dư = tổng movements
    pub fn balance(&self) -> Decimal {
        saturating_sum(self.movements())
    }

    /// Tổng tiền nạp
    pub fn deposits_total(&self) -> Decimal {
        saturating_sum(self.movements().filter(|m| *m > Decimal::ZERO))
    }

    /// Tổng tiền rút (giá trị tuyệt đối)
    pub fn withdrawals_total(&self) -> Decimal {
        saturating_sum(self.movements().filter(|m| *m < Decimal::ZERO)).abs()
    }

    /// Tiền lãi: mỗi khoản nạp sinh `m * rate / 100`, chỉ cộng các khoản lãi >= 1.
    pub fn interest_total(&self) -> Decimal {
        let hundred = Decimal::ONE_HUNDRED;
        saturating_sum(
            self.movements()
                .filter(|m| *m > Decimal::ZERO)
                .map(|deposit| (deposit / hundred).saturating_mul(self.interest_rate))
                .filter(|interest| *interest >= Decimal::ONE),
        )
    }

    /// Ghi thêm các movement này thì balance, tổng nạp và tổng rút có còn
    /// tính chính xác được không (không tràn, không bị làm tròn).
    pub fn can_record(&self, extra: impl IntoIterator<Item = Decimal>) -> bool {
        exact_totals(self.movements().chain(extra)).is_some()
    }

    /// Có movement nào >= threshold không
    pub fn has_movement_at_least(&self, threshold: Decimal) -> bool {
        self.movements().any(|m| m >= threshold)
    }

    /// View đã sắp xếp tăng dần theo số tiền; không đụng tới thứ tự gốc.
    pub fn sorted_entries(&self) -> Vec<&Movement> {
        let mut sorted: Vec<&Movement> = self.movements.iter().collect();
        sorted.sort_by(|a, b| a.amount.cmp(&b.amount));
        sorted
    }

    /// Tên gọi đầu tiên của chủ tài khoản
    pub fn first_name(&self) -> &str {
        self.owner.split_whitespace().next().unwrap_or(&self.owner)
    }

    /// Kiểm tra PIN
    pub fn pin_matches(&self, pin: u32) -> bool {
        self.pin == pin
    }
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, |acc, m| acc.saturating_add(m))
}

/// Cộng mà không làm tròn: Decimal giảm scale khi mantissa tràn 96 bit.
fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    (sum.scale() >= a.scale().max(b.scale())).then_some(sum)
}

/// (balance, tổng nạp, tổng rút)
fn exact_totals(mut amounts: impl Iterator<Item = Decimal>) -> Option<(Decimal, Decimal, Decimal)> {
    amounts.try_fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(balance, deposits, withdrawals), m| {
            let balance = exact_add(balance, m)?;
            if m > Decimal::ZERO {
                Some((balance, exact_add(deposits, m)?, withdrawals))
            } else {
                Some((balance, deposits, exact_add(withdrawals, m)?))
            }
        },
    )
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} (owner: {}, movements: {}, balance: {} {})",
            self.username,
            self.owner,
            self.movements.len(),
            self.balance(),
            self.currency
        )
    }
}
