// Event card data as extracted from the rendered events page.
use crate::model::date::normalize_date_text;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A single event listing. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Localized date line, e.g. `"التاريخ: 15 تشرين الأول 2024"`.
    #[serde(default, rename = "date_text", alias = "rawDateText")]
    pub raw_date_text: String,
}

impl EventRecord {
    pub fn new(title: &str, description: &str, category: &str, raw_date_text: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            raw_date_text: raw_date_text.to_string(),
        }
    }

    /// Derives `YYYY-MM-DD` from the date line, or an empty string when it has none.
    ///
    /// Not cached: every call parses `raw_date_text` again.
    pub fn iso_date(&self) -> String {
        normalize_date_text(&self.raw_date_text)
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.title)?;
        let iso = self.iso_date();
        if !iso.is_empty() {
            write!(f, " ({})", iso)?;
        }
        Ok(())
    }
}

/// Loads event records from a JSON array file, keeping file order.
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file '{}'", path.display()))?;
    let events: Vec<EventRecord> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse events file '{}'", path.display()))?;
    log::debug!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}
