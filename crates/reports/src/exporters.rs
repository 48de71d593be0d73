//! Report exporters - plain text, Markdown
//!
//! The dashboard and the account listing both implement [`ReportData`], so
//! the CLI can print either one with the same exporters.

use crate::format::format_currency;
use crate::view::AccountView;
use bankist_core::Account;

/// Trait for exporting reports to different formats
pub trait ReportExporter {
    /// Export to the target format
    fn export(&self, report: &dyn ReportData) -> String;
}

/// Trait for data that can be exported
pub trait ReportData {
    /// Get the report title
    fn title(&self) -> String;

    /// Get column headers
    fn headers(&self) -> Vec<String>;

    /// Get data rows
    fn rows(&self) -> Vec<Vec<String>>;

    /// Get summary statistics as key-value pairs
    fn summary(&self) -> Vec<(String, String)>;
}

// ============================================================================
// Text Exporter
// ============================================================================

/// Column-aligned terminal output
pub struct TextExporter {
    include_summary: bool,
}

impl Default for TextExporter {
    fn default() -> Self {
        Self {
            include_summary: true,
        }
    }
}

impl TextExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows only, no summary block
    pub fn without_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }
}

impl ReportExporter for TextExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();
        let title = report.title();
        output.push_str(&title);
        output.push('\n');
        output.push_str(&"=".repeat(title.chars().count()));
        output.push('\n');

        let headers = report.headers();
        let rows = report.rows();

        // Column widths
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        if !headers.is_empty() {
            output.push_str(&line(&headers));
            output.push('\n');
        }
        for row in &rows {
            output.push_str(&line(row));
            output.push('\n');
        }

        if self.include_summary {
            output.push('\n');
            for (key, value) in report.summary() {
                output.push_str(&format!("{}: {}\n", key, value));
            }
        }

        output
    }
}

// ============================================================================
// Markdown Exporter
// ============================================================================

/// Markdown format exporter
pub struct MarkdownExporter {
    include_summary: bool,
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self {
            include_summary: true,
        }
    }
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows only, no summary block
    pub fn without_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }
}

impl ReportExporter for MarkdownExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();

        // Title
        output.push_str(&format!("# {}\n\n", report.title()));

        // Summary section
        if self.include_summary {
            output.push_str("## Summary\n\n");
            for (key, value) in report.summary() {
                output.push_str(&format!("- **{}**: {}\n", key, value));
            }
            output.push('\n');
        }

        let headers = report.headers();
        if !headers.is_empty() {
            // Header row
            output.push_str("| ");
            output.push_str(&headers.join(" | "));
            output.push_str(" |\n");

            // Separator row
            output.push_str("| ");
            output.push_str(&headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | "));
            output.push_str(" |\n");

            // Data rows
            for row in report.rows() {
                let escaped: Vec<String> = row.iter().map(|c| c.replace('|', "\\|")).collect();
                output.push_str("| ");
                output.push_str(&escaped.join(" | "));
                output.push_str(" |\n");
            }
        }

        output
    }
}

// ============================================================================
// Report data
// ============================================================================

impl ReportData for AccountView {
    fn title(&self) -> String {
        format!("{} ({})", self.owner, self.username)
    }

    fn headers(&self) -> Vec<String> {
        vec![
            "#".to_string(),
            "Type".to_string(),
            "Date".to_string(),
            "Amount".to_string(),
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.number.to_string(),
                    row.kind.as_str().to_string(),
                    row.display_date.clone(),
                    row.formatted_amount.clone(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Balance".to_string(), self.formatted_balance.clone()),
            ("In".to_string(), self.summary.formatted_incomes.clone()),
            ("Out".to_string(), self.summary.formatted_outflows.clone()),
            ("Interest".to_string(), self.summary.formatted_interest.clone()),
        ]
    }
}

/// Listing of every account in the store
pub struct AccountListReport {
    rows: Vec<AccountListRow>,
}

struct AccountListRow {
    owner: String,
    username: String,
    currency: String,
    locale: String,
    movements: usize,
    balance: String,
}

impl AccountListReport {
    pub fn new(accounts: &[Account]) -> Self {
        let rows = accounts
            .iter()
            .map(|account| AccountListRow {
                owner: account.owner.clone(),
                username: account.username.clone(),
                currency: account.currency.code.clone(),
                locale: account.locale.clone(),
                movements: account.entries().len(),
                balance: format_currency(account.balance(), &account.locale, &account.currency),
            })
            .collect();
        Self { rows }
    }
}

impl ReportData for AccountListReport {
    fn title(&self) -> String {
        "Accounts".to_string()
    }

    fn headers(&self) -> Vec<String> {
        ["Owner", "Username", "Currency", "Locale", "Movements", "Balance"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.owner.clone(),
                    row.username.clone(),
                    row.currency.clone(),
                    row.locale.clone(),
                    row.movements.to_string(),
                    row.balance.clone(),
                ]
            })
            .collect()
    }

    fn summary(&self) -> Vec<(String, String)> {
        vec![("Total accounts".to_string(), self.rows.len().to_string())]
    }
}
