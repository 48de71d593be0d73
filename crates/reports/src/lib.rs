//! # Bankist Reports
//!
//! Presentation layer for the banking dashboard.
//!
//! ## Formatting
//!
//! - [`format_currency`] - locale-aware money (`$1,300.00`, `1.300,00 €`)
//! - [`format_movement_date`] - `Today`, `Yesterday`, `N days ago` or a short date
//! - [`format_date_time`] / [`format_countdown`] - header clock and logout timer
//!
//! ## Views and exporters
//!
//! - [`AccountView`] - balance, movement rows and summary for one account
//! - [`TextExporter`] / [`MarkdownExporter`] - render any [`ReportData`]

pub mod exporters;
pub mod format;
pub mod locale;
pub mod view;

// Re-export main types
pub use exporters::{AccountListReport, MarkdownExporter, ReportData, ReportExporter, TextExporter};
pub use format::{
    days_between, format_countdown, format_currency, format_date, format_date_time,
    format_movement_date,
};
pub use locale::Locale;
pub use view::{AccountView, MovementKind, MovementRow, Summary};
