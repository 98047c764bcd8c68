//! Output formatting shared by the scan and batch commands.

use chrono::NaiveDate;
use console::style;

use shelflife_core::models::config::OutputConfig;
use shelflife_core::{ExpiryStatus, GroceryItem, InterpretResult};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// Format items for display or writing.
pub fn format_items(
    items: &[GroceryItem],
    format: OutputFormat,
    today: NaiveDate,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => format_csv(items, today, config),
        OutputFormat::Text => Ok(format_text(items, today, config)),
    }
}

/// Format a full interpretation result, candidates included, as JSON.
pub fn format_metadata(result: &InterpretResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn format_csv(items: &[GroceryItem], today: NaiveDate, config: &OutputConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(["id", "name", "expiry_date", "added_date", "confidence", "status"])?;
    for item in items {
        wtr.write_record([
            item.id.as_str(),
            item.name.as_str(),
            &item.expiry_date.format("%Y-%m-%d").to_string(),
            &item.added_date.format("%Y-%m-%d").to_string(),
            &format!("{:.2}", item.confidence),
            item.status(today, config.expiring_soon_days).label(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(items: &[GroceryItem], today: NaiveDate, config: &OutputConfig) -> String {
    if items.is_empty() {
        return "No items extracted.".to_string();
    }

    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(format!("{} item(s):", items.len()));

    for item in items {
        let status = item.status(today, config.expiring_soon_days);
        let status = match status {
            ExpiryStatus::Expired => style(status.label()).red(),
            ExpiryStatus::ExpiringSoon => style(status.label()).yellow(),
            ExpiryStatus::Fresh => style(status.label()).green(),
        };

        let mut line = format!(
            "  {:<24} {}  {}",
            item.name,
            item.expiry_date.format("%Y-%m-%d"),
            status
        );
        if config.show_confidence {
            line.push_str(&format!("  ({:.0}%)", item.confidence * 100.0));
        }
        lines.push(line);
    }

    lines.join("\n")
}
