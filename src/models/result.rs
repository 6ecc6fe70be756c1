//! Search result input record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One search result listing item as presented by the input provider.
///
/// Built once per listing item and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInput {
    /// Visible snippet text under the result title.
    #[serde(default, alias = "snippetText")]
    pub snippet: String,
    /// Result title text.
    #[serde(default, alias = "titleText")]
    pub title: String,
    /// Resolved absolute URL of the result link, if any.
    #[serde(default)]
    pub url: Option<String>,
}

impl ResultInput {
    pub fn new(
        snippet: impl Into<String>,
        title: impl Into<String>,
        url: Option<impl Into<String>>,
    ) -> Self {
        Self {
            snippet: snippet.into(),
            title: title.into(),
            url: url.map(Into::into),
        }
    }

    /// Text scanned for technology signals: snippet followed by title.
    pub fn scan_text(&self) -> String {
        format!("{} {}", self.snippet, self.title)
    }

    /// The URL, treating an empty string as absent.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Errors from reading result records.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid result array: {0}")]
    Array(String),

    #[error("Invalid result record on line {line}: {message}")]
    Record { line: usize, message: String },
}

/// Parse result records from a JSON array or from JSON lines.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_results(text: &str) -> Result<Vec<ResultInput>, InputError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| InputError::Array(e.to_string()));
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| InputError::Record {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}
