//! # Error Module
//!
//! Định nghĩa các domain errors cho Bankist sử dụng thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Các lỗi khi dựng dữ liệu tài khoản từ cấu hình tĩnh.
#[derive(Debug, Error)]
pub enum CoreError {
    // === Seed errors ===
    #[error("Movement dates mismatch for {owner}: {movements} movements, {dates} dates")]
    MovementDatesMismatch {
        owner: String,
        movements: usize,
        dates: usize,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Movements of {owner} exceed the representable amount range")]
    TotalsOutOfRange { owner: String },

    // === Config errors ===
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Kiểm tra có phải lỗi cấu hình không (file, JSON, giá trị)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CoreError::Config(_) | CoreError::Io(_) | CoreError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::MovementDatesMismatch {
            owner: "Jonas Schmedtmann".to_string(),
            movements: 3,
            dates: 2,
        };
        assert_eq!(
            err.to_string(),
            "Movement dates mismatch for Jonas Schmedtmann: 3 movements, 2 dates"
        );

        let err = CoreError::InvalidDate("yesterday".to_string());
        assert_eq!(err.to_string(), "Invalid date: yesterday");
    }

    #[test]
    fn test_error_checks() {
        assert!(CoreError::Config("timeout".to_string()).is_config_error());
        assert!(!CoreError::InvalidDate("x".to_string()).is_config_error());
    }
}
