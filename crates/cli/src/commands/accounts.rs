//! Account listing

use anyhow::{Context, Result};
use bankist_core::BankConfig;
use bankist_reports::{AccountListReport, MarkdownExporter, ReportExporter, TextExporter};

use crate::ListFormat;

/// Print every seeded account with its balance
pub fn list(config: &BankConfig, format: ListFormat, summary: bool) -> Result<()> {
    println!("{}", render(config, format, summary)?);
    Ok(())
}

fn render(config: &BankConfig, format: ListFormat, summary: bool) -> Result<String> {
    let store = config.build_store().context("Failed to build account store")?;
    let report = AccountListReport::new(store.accounts());

    let output = match (format, summary) {
        (ListFormat::Text, true) => TextExporter::new().export(&report),
        (ListFormat::Text, false) => TextExporter::new().without_summary().export(&report),
        (ListFormat::Markdown, true) => MarkdownExporter::new().export(&report),
        (ListFormat::Markdown, false) => MarkdownExporter::new().without_summary().export(&report),
        (ListFormat::Json, _) => serde_json::to_string_pretty(store.accounts())
            .context("Failed to serialize accounts")?,
    };
    Ok(output)
}
