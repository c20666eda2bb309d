use anyhow::{anyhow, Result};
use std::str::FromStr;

use crate::models::Category;

/// Validation utilities for coded-message rows and caller-supplied parameters
///
/// Row validation is deliberately forgiving at the table level: the loader
/// skips rows that fail these checks and tallies them instead of aborting,
/// so a single bad row never takes down a whole aggregation.
#[derive(Debug, Copy, Clone)]
pub struct RecordValidator;

impl RecordValidator {
    /// Validate a message identifier
    pub fn validate_id(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(anyhow!("Message ID cannot be empty"));
        }

        if id.len() > 128 {
            return Err(anyhow!("Message ID too long (max 128 characters)"));
        }

        if id.contains('\0') || id.contains('\r') || id.contains('\n') {
            return Err(anyhow!("Message ID contains invalid characters"));
        }

        Ok(())
    }

    /// Validate an intensity score against the 1-5 ordinal scale
    pub fn validate_intensity(intensity: u8) -> Result<()> {
        if !(1..=5).contains(&intensity) {
            return Err(anyhow!(
                "Intensity score must be between 1 and 5, got {intensity}"
            ));
        }

        Ok(())
    }

    /// Parse and validate a semicolon-separated category list against the taxonomy
    pub fn parse_categories(raw: &str) -> Result<Vec<Category>> {
        let mut categories = Vec::new();

        for part in raw.split(';') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }

            let category = Category::from_str(trimmed).map_err(|e| anyhow!(e))?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Ok(categories)
    }

    /// Parse a semicolon-separated list of subcategories or markers
    #[must_use]
    pub fn parse_labels(raw: &str) -> Vec<String> {
        raw.split(';')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate a caller-supplied top-N limit
    pub fn validate_top_n(n: usize) -> Result<()> {
        if n == 0 {
            return Err(anyhow!("Top-N limit must be greater than 0"));
        }

        if n > 1000 {
            return Err(anyhow!("Top-N limit too large (max 1000)"));
        }

        Ok(())
    }

    /// Validate a histogram bin count
    pub fn validate_bin_count(bins: usize) -> Result<()> {
        if bins == 0 {
            return Err(anyhow!("Bin count must be greater than 0"));
        }

        if bins > 500 {
            return Err(anyhow!("Bin count too large (max 500)"));
        }

        Ok(())
    }

    /// Sanitize free-form text from source files
    #[must_use]
    pub fn sanitize_text(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect::<String>()
            .trim()
            .to_string()
    }
}
