//! Loading of coded-message CSV tables and precomputed JSON summaries
//!
//! Both inputs are produced by the upstream coding pipeline
//! (`coded_messages_detailed.csv` and `analysis_summary.json`). Malformed
//! rows are skipped and tallied rather than failing the whole load.

use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::models::{AnalysisSummary, MessageRecord};
use crate::validation::RecordValidator;

/// A validated record table plus the count of rows that failed validation
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    /// Rows that passed validation
    pub records: Vec<MessageRecord>,
    /// Rows skipped for missing or malformed fields
    pub skipped: usize,
}

/// Raw CSV row as written by the upstream coder, before validation
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Message_ID")]
    message_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Categories", default)]
    categories: String,
    #[serde(rename = "Subcategories", default)]
    subcategories: String,
    #[serde(rename = "Intensity_Score", default)]
    intensity_score: String,
    #[serde(rename = "Relevant", default)]
    relevant: String,
    #[serde(rename = "Views", default)]
    views: u64,
    #[serde(rename = "Forwards", default)]
    forwards: u64,
    #[serde(rename = "Has_Photo", default)]
    has_photo: String,
    #[serde(rename = "Has_Document", default)]
    has_document: String,
    #[serde(rename = "Linguistic_Markers", default)]
    linguistic_markers: String,
    #[serde(rename = "Text_Preview", default)]
    text_preview: String,
}

/// Parse a boolean flag as the pandas exporter writes it ("True"/"False",
/// occasionally "1"/"0"); an absent column falls back to `default`.
fn parse_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "true" | "1" | "yes" => true,
        _ => false,
    }
}

/// Parse an intensity score, tolerating the float form pandas emits ("1.0")
fn parse_intensity(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<u8>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|value| value as u8))
}

/// Load and validate the coded-message table from a CSV file
///
/// Returns `MissingInput` if the file does not exist; any row failing
/// validation is skipped and tallied in `LoadedTable::skipped`.
pub fn load_csv(path: &Path) -> Result<LoadedTable> {
    if !path.exists() {
        return Err(DashboardError::MissingInput(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut table = LoadedTable::default();

    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                warn!(row = index + 1, error = %e, "Skipping unparseable row");
                table.skipped += 1;
                continue;
            }
        };

        match validate_row(raw) {
            Ok(record) => table.records.push(record),
            Err(e) => {
                warn!(row = index + 1, error = %e, "Skipping invalid row");
                table.skipped += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        records = table.records.len(),
        skipped = table.skipped,
        "Loaded coded-message table"
    );

    Ok(table)
}

/// Load the precomputed analysis summary from a JSON file
pub fn load_summary(path: &Path) -> Result<AnalysisSummary> {
    if !path.exists() {
        return Err(DashboardError::MissingInput(path.to_path_buf()));
    }

    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;

    let summary: AnalysisSummary = serde_json::from_str(&contents)?;
    debug!(
        path = %path.display(),
        total = summary.header.total_messages_analyzed,
        relevant = summary.header.relevant_messages_found,
        "Loaded analysis summary"
    );

    Ok(summary)
}

/// Convert a raw CSV row into a validated `MessageRecord`
fn validate_row(raw: RawRow) -> Result<MessageRecord> {
    RecordValidator::validate_id(&raw.message_id).map_err(|e| DashboardError::InvalidRecord {
        id: raw.message_id.clone(),
        reason: e.to_string(),
    })?;

    let timestamp = parse_timestamp(&raw.date).ok_or_else(|| DashboardError::InvalidRecord {
        id: raw.message_id.clone(),
        reason: format!("Unparseable date: {}", raw.date),
    })?;

    let intensity = parse_intensity(&raw.intensity_score);
    if let Some(level) = intensity {
        RecordValidator::validate_intensity(level).map_err(|e| {
            DashboardError::InvalidRecord {
                id: raw.message_id.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    let categories = RecordValidator::parse_categories(&raw.categories).map_err(|e| {
        DashboardError::InvalidRecord {
            id: raw.message_id.clone(),
            reason: e.to_string(),
        }
    })?;

    Ok(MessageRecord {
        id: raw.message_id,
        timestamp,
        categories,
        subcategories: RecordValidator::parse_labels(&raw.subcategories),
        intensity,
        // Rows in the detailed export are relevant unless flagged otherwise.
        relevant: parse_flag(&raw.relevant, true),
        views: raw.views,
        forwards: raw.forwards,
        has_photo: parse_flag(&raw.has_photo, false),
        has_document: parse_flag(&raw.has_document, false),
        markers: RecordValidator::parse_labels(&raw.linguistic_markers),
        text_preview: RecordValidator::sanitize_text(&raw.text_preview),
    })
}

/// Parse the date formats the upstream pipeline has been observed to emit
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    // Date-only exports carry no time component; midnight is assumed.
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-03-01 14:05:00").is_some());
        assert!(parse_timestamp("2024-03-01T14:05:00").is_some());
        assert!(parse_timestamp("2024-03-01").is_some());
        assert!(parse_timestamp("03/01/2024").is_none());
    }

    #[test]
    fn test_parse_flag_pandas_booleans() {
        assert!(parse_flag("True", false));
        assert!(!parse_flag("False", true));
        assert!(parse_flag("", true));
        assert!(!parse_flag("", false));
    }

    #[test]
    fn test_parse_intensity_float_form() {
        assert_eq!(parse_intensity("1"), Some(1));
        assert_eq!(parse_intensity("3.0"), Some(3));
        assert_eq!(parse_intensity(""), None);
        assert_eq!(parse_intensity("n/a"), None);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv(Path::new("/nonexistent/coded_messages_detailed.csv"));
        assert!(matches!(result, Err(DashboardError::MissingInput(_))));
    }
}
