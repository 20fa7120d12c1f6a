//! Output formatting for command results.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render `value` as JSON or with its plain-text renderer.
pub fn render<T, F>(format: OutputFormat, value: &T, text: F) -> Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("failed to serialise output")?;
            json.push('\n');
            Ok(json)
        }
    }
}
