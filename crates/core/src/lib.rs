//! # Bankist Core
//!
//! Core domain types cho Bankist: Account, Movement, Currency,
//! AccountStore và cấu hình seed.
//!
//! Crate này không biết gì về session, timer hay cách hiển thị;
//! các layer phía trên (`bankist-business`, `bankist-reports`) dùng lại các type ở đây.

pub mod account;
pub mod config;
pub mod error;
pub mod money;
pub mod store;

pub use account::{derive_username, Account, Movement};
pub use config::{AccountSeed, BankConfig};
pub use error::{CoreError, CoreResult};
pub use money::Currency;
pub use store::AccountStore;
