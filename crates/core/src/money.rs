//! # Money Module
//!
//! Định nghĩa Currency cho các tài khoản. Số tiền dùng trực tiếp
//! `rust_decimal::Decimal` để cộng trừ chính xác (200 + 455.23 - 306.5 = 348.73).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Đại diện cho một loại tiền tệ (ISO 4217).
///
/// # Examples
/// ```
/// use bankist_core::Currency;
///
/// let eur = Currency::from_code("eur");
/// assert_eq!(eur.code, "EUR");
/// assert_eq!(eur.symbol, "€");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// Mã tiền tệ ISO 4217
    pub code: String,
    /// Ký hiệu hiển thị
    pub symbol: String,
    /// Số chữ số thập phân khi hiển thị (USD=2, JPY=0)
    pub decimals: u32,
}

impl Currency {
    /// Tạo Currency mới
    pub fn new(code: &str, symbol: &str, decimals: u32) -> Self {
        Self {
            code: code.to_uppercase(),
            symbol: symbol.to_string(),
            decimals,
        }
    }

    // === Preset currencies ===

    /// Euro (2 decimals)
    pub fn eur() -> Self {
        Self::new("EUR", "€", 2)
    }

    /// US Dollar (2 decimals)
    pub fn usd() -> Self {
        Self::new("USD", "$", 2)
    }

    /// British Pound (2 decimals)
    pub fn gbp() -> Self {
        Self::new("GBP", "£", 2)
    }

    /// Japanese Yen (0 decimals)
    pub fn jpy() -> Self {
        Self::new("JPY", "¥", 0)
    }

    /// Vietnamese Dong (0 decimals)
    pub fn vnd() -> Self {
        Self::new("VND", "₫", 0)
    }

    /// Tra cứu theo mã. Mã lạ vẫn dùng được: ký hiệu chính là mã, 2 decimals.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "EUR" => Self::eur(),
            "USD" => Self::usd(),
            "GBP" => Self::gbp(),
            "JPY" => Self::jpy(),
            "VND" => Self::vnd(),
            other => Self::new(other, other, 2),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
