//! # Config Module
//!
//! Cấu hình tĩnh của ngân hàng demo: thời gian session, độ trễ duyệt khoản vay,
//! tỉ lệ điều kiện vay, và danh sách tài khoản seed.
//!
//! File JSON dùng cùng tên trường với dữ liệu gốc (`movementsDates`, `interestRate`).

use crate::account::{Account, Movement};
use crate::error::{CoreError, CoreResult};
use crate::money::Currency;
use crate::store::AccountStore;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thời gian tự động logout mặc định (giây)
pub const DEFAULT_SESSION_TIMEOUT_SECS: u32 = 300;

/// Độ trễ duyệt khoản vay mặc định (ms)
pub const DEFAULT_LOAN_DELAY_MS: u64 = 2500;

/// Một tài khoản khai báo trong cấu hình.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSeed {
    pub owner: String,
    pub movements: Vec<Decimal>,
    /// RFC 3339, song song với `movements`
    pub movements_dates: Vec<String>,
    pub interest_rate: Decimal,
    pub pin: u32,
    pub currency: String,
    pub locale: String,
}

impl AccountSeed {
    /// Dựng Account, kiểm tra độ dài, định dạng ngày và phạm vi các tổng.
    pub fn to_account(&self) -> CoreResult<Account> {
        if self.movements.len() != self.movements_dates.len() {
            return Err(CoreError::MovementDatesMismatch {
                owner: self.owner.clone(),
                movements: self.movements.len(),
                dates: self.movements_dates.len(),
            });
        }

        let movements = self
            .movements
            .iter()
            .zip(&self.movements_dates)
            .map(|(amount, date)| Ok(Movement::new(*amount, parse_date(date)?)))
            .collect::<CoreResult<Vec<_>>>()?;

        let account = Account::new(
            &self.owner,
            self.interest_rate,
            self.pin,
            Currency::from_code(&self.currency),
            &self.locale,
        )
        .with_movements(movements);

        if !account.can_record(std::iter::empty()) {
            return Err(CoreError::TotalsOutOfRange {
                owner: self.owner.clone(),
            });
        }
        Ok(account)
    }
}

fn parse_date(raw: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidDate(format!("{raw}: {e}")))
}

/// Cấu hình toàn bộ ngân hàng demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankConfig {
    /// Số giây trước khi tự động logout
    pub session_timeout_secs: u32,
    /// Độ trễ trước khi khoản vay được ghi nhận (ms)
    pub loan_delay_ms: u64,
    /// Khoản vay chỉ được duyệt nếu có movement >= amount * loan_ratio
    pub loan_ratio: Decimal,
    pub accounts: Vec<AccountSeed>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            loan_delay_ms: DEFAULT_LOAN_DELAY_MS,
            loan_ratio: Decimal::new(1, 1),
            accounts: demo_seeds(),
        }
    }
}

impl BankConfig {
    /// Parse từ chuỗi JSON
    pub fn from_json_str(raw: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Đọc từ file JSON
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Kiểm tra các giá trị cấu hình
    pub fn validate(&self) -> CoreResult<()> {
        if self.session_timeout_secs == 0 {
            return Err(CoreError::Config(
                "sessionTimeoutSecs must be positive".to_string(),
            ));
        }
        if self.loan_ratio <= Decimal::ZERO {
            return Err(CoreError::Config("loanRatio must be positive".to_string()));
        }
        Ok(())
    }

    /// Dựng AccountStore từ danh sách seeds
    pub fn build_store(&self) -> CoreResult<AccountStore> {
        AccountStore::from_seeds(&self.accounts)
    }
}

fn seed(
    owner: &str,
    movements: &[(i64, u32)],
    dates: &[&str],
    interest_rate: Decimal,
    pin: u32,
    currency: &str,
    locale: &str,
) -> AccountSeed {
    AccountSeed {
        owner: owner.to_string(),
        movements: movements
            .iter()
            .map(|(num, scale)| Decimal::new(*num, *scale))
            .collect(),
        movements_dates: dates.iter().map(|d| d.to_string()).collect(),
        interest_rate,
        pin,
        currency: currency.to_string(),
        locale: locale.to_string(),
    }
}

/// Hai tài khoản demo ban đầu
pub fn demo_seeds() -> Vec<AccountSeed> {
    vec![
        seed(
            "Jonas Schmedtmann",
            &[
                (200, 0),
                (45523, 2),
                (-3065, 1),
                (25000, 0),
                (-64221, 2),
                (-1339, 1),
                (7997, 2),
                (1300, 0),
            ],
            &[
                "2019-11-18T21:31:17.178Z",
                "2019-12-23T07:42:02.383Z",
                "2020-01-28T09:15:04.904Z",
                "2020-04-01T10:17:24.185Z",
                "2024-04-28T14:11:59.604Z",
                "2024-05-02T17:01:17.194Z",
                "2024-05-03T13:36:17.929Z",
                "2024-05-04T10:51:36.790Z",
            ],
            Decimal::new(12, 1),
            1111,
            "EUR",
            "pt-PT",
        ),
        seed(
            "Jessica Davis",
            &[
                (5000, 0),
                (3400, 0),
                (-150, 0),
                (-790, 0),
                (-3210, 0),
                (-1000, 0),
                (8500, 0),
                (-30, 0),
            ],
            &[
                "2019-11-01T13:15:33.035Z",
                "2019-11-30T09:48:16.867Z",
                "2019-12-25T06:04:23.907Z",
                "2020-01-25T14:18:46.235Z",
                "2020-02-05T16:33:06.386Z",
                "2020-04-10T14:43:26.374Z",
                "2020-06-25T18:49:59.371Z",
                "2024-05-04T10:51:36.790Z",
            ],
            Decimal::new(15, 1),
            2222,
            "USD",
            "en-US",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BankConfig::default();

        assert_eq!(config.session_timeout_secs, 300);
        assert_eq!(config.loan_delay_ms, 2500);
        assert_eq!(config.loan_ratio, dec!(0.1));
        assert_eq!(config.accounts.len(), 2);
    }

    #[test]
    fn test_demo_seed_values() {
        let seeds = demo_seeds();
        assert_eq!(seeds[0].movements[1], dec!(455.23));
        assert_eq!(seeds[0].movements[2], dec!(-306.5));
        assert_eq!(seeds[0].interest_rate, dec!(1.2));

        let jonas = seeds[0].to_account().unwrap();
        assert_eq!(jonas.balance(), dec!(25952.59));
    }

    #[test]
    fn test_seed_length_mismatch_rejected() {
        let mut seed = demo_seeds().remove(0);
        seed.movements_dates.pop();

        let err = seed.to_account().unwrap_err();
        assert!(matches!(
            err,
            CoreError::MovementDatesMismatch {
                movements: 8,
                dates: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_seed_invalid_date_rejected() {
        let mut seed = demo_seeds().remove(1);
        seed.movements_dates[0] = "yesterday".to_string();

        assert!(matches!(seed.to_account(), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn test_seed_totals_out_of_range_rejected() {
        let mut seed = demo_seeds().remove(1);
        seed.movements = vec![Decimal::MAX; 8];

        assert!(matches!(
            seed.to_account(),
            Err(CoreError::TotalsOutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_json_str_with_defaults() {
        let raw = r#"{
            "sessionTimeoutSecs": 60,
            "accounts": [{
                "owner": "Sarah Smith",
                "movements": ["430", "1000", "-700.5"],
                "movementsDates": [
                    "2024-01-01T00:00:00Z",
                    "2024-01-02T00:00:00Z",
                    "2024-01-03T00:00:00Z"
                ],
                "interestRate": "1",
                "pin": 4444,
                "currency": "GBP",
                "locale": "en-GB"
            }]
        }"#;

        let config = BankConfig::from_json_str(raw).unwrap();
        assert_eq!(config.session_timeout_secs, 60);
        assert_eq!(config.loan_delay_ms, 2500);

        let store = config.build_store().unwrap();
        let sarah = store.find_by_username("ss").unwrap();
        assert_eq!(sarah.balance(), dec!(729.5));
        assert_eq!(sarah.currency.symbol, "£");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = BankConfig::from_json_str(r#"{ "sessionTimeoutSecs": 0 }"#).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "loanDelayMs": 100, "loanRatio": "0.5" }}"#).unwrap();

        let config = BankConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.loan_delay_ms, 100);
        assert_eq!(config.loan_ratio, dec!(0.5));
        assert_eq!(config.accounts.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = BankConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
