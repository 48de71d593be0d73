//! # Store Module
//!
//! AccountStore: danh sách tài khoản trong bộ nhớ, dựng từ cấu hình tĩnh
//! lúc khởi động. Không có persistence.

use crate::account::Account;
use crate::config::{demo_seeds, AccountSeed};
use crate::error::CoreResult;

/// Danh sách tài khoản, giữ nguyên thứ tự khai báo.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Tạo store từ danh sách account có sẵn
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Dựng store từ seeds (kiểm tra ngày tháng và độ dài)
    pub fn from_seeds(seeds: &[AccountSeed]) -> CoreResult<Self> {
        let accounts = seeds
            .iter()
            .map(AccountSeed::to_account)
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self::new(accounts))
    }

    /// Hai tài khoản demo (Jonas Schmedtmann, Jessica Davis)
    pub fn demo() -> CoreResult<Self> {
        Self::from_seeds(&demo_seeds())
    }

    /// Tìm account đầu tiên có username khớp
    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    /// Lấy mutable account theo username
    pub fn find_mut(&mut self, username: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.username == username)
    }

    /// Kiểm tra username có tồn tại không
    pub fn contains(&self, username: &str) -> bool {
        self.position(username).is_some()
    }

    /// Lấy đồng thời hai account khác nhau để ghi (chuyển khoản).
    ///
    /// Trả về `None` nếu thiếu một trong hai hoặc hai username trùng nhau.
    pub fn pair_mut(&mut self, first: &str, second: &str) -> Option<(&mut Account, &mut Account)> {
        let i = self.position(first)?;
        let j = self.position(second)?;
        if i == j {
            return None;
        }

        if i < j {
            let (left, right) = self.accounts.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.accounts.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        }
    }

    /// Xóa account đầu tiên khớp username. Không tìm thấy thì không làm gì.
    pub fn remove_account(&mut self, username: &str) -> Option<Account> {
        self.position(username).map(|index| self.accounts.remove(index))
    }

    /// Toàn bộ accounts
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn position(&self, username: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a.username == username)
    }
}
