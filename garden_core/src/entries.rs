//! Mood entry import from caller-owned CSV files.
//!
//! Expected columns are `date,mood` with ISO dates. Bad rows are skipped
//! with a warning so one typo does not hide a whole week.

use crate::{MoodEntry, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// CSV row format for mood entries
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    mood: i32,
}

impl TryFrom<CsvRow> for MoodEntry {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
            .map_err(|e| crate::Error::Other(format!("Invalid date '{}': {}", row.date, e)))?;
        Ok(MoodEntry::new(date, row.mood))
    }
}

/// Load mood entries from a CSV file
///
/// Returns entries sorted by date, one per date. When a date appears more
/// than once the later row wins.
pub fn load_entries_csv(path: &Path) -> Result<Vec<MoodEntry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut by_date = BTreeMap::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        match result {
            Ok(row) => match MoodEntry::try_from(row) {
                Ok(entry) => {
                    if let Some(previous) = by_date.insert(entry.date, entry.mood_value) {
                        tracing::warn!(
                            "Duplicate entry for {} at line {} replaces mood {}",
                            entry.date,
                            line,
                            previous
                        );
                    }
                }
                Err(e) => tracing::warn!("Skipping line {}: {}", line, e),
            },
            Err(e) => tracing::warn!("Failed to deserialize line {}: {}", line, e),
        }
    }

    let entries: Vec<MoodEntry> = by_date
        .into_iter()
        .map(|(date, mood)| MoodEntry::new(date, mood))
        .collect();

    tracing::debug!("Loaded {} mood entries from {:?}", entries.len(), path);
    Ok(entries)
}
