//! Data-source providers and the ordered fallback chain
//!
//! The dashboard prefers the combined-dataset results, falls back to the
//! single-dataset results, and finally to synthetic demo data. Rather than
//! nesting existence checks, each source is a provider returning either a
//! loaded dataset or an absence signal, and the chain walks them in order.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::demo::DemoSource;
use crate::error::{DashboardError, Result};
use crate::loader;
use crate::models::Dataset;

/// A provider in the fallback chain
///
/// `fetch` returns `Ok(None)` when the source's inputs are absent, which
/// sends the chain on to the next provider; `Err` is reserved for inputs
/// that exist but cannot be read.
pub trait DataSource {
    /// Human-readable name used in logs and the CLI banner
    fn name(&self) -> &str;

    /// Try to produce a dataset, or signal absence
    fn fetch(&self) -> Result<Option<Dataset>>;
}

/// Loads `coded_messages_detailed.csv` + `analysis_summary.json` from a
/// results directory
#[derive(Debug, Clone)]
pub struct ResultsDirSource {
    name: String,
    csv_path: PathBuf,
    json_path: PathBuf,
}

impl ResultsDirSource {
    /// Standard file name of the detailed record table
    pub const CSV_FILE: &'static str = "coded_messages_detailed.csv";
    /// Standard file name of the precomputed summary
    pub const JSON_FILE: &'static str = "analysis_summary.json";

    /// Create a source over a results directory using the standard file names
    #[must_use]
    pub fn new(name: impl Into<String>, dir: &Path) -> Self {
        Self {
            name: name.into(),
            csv_path: dir.join(Self::CSV_FILE),
            json_path: dir.join(Self::JSON_FILE),
        }
    }

    /// Create a source over explicit file paths (upload mode)
    #[must_use]
    pub fn from_files(name: impl Into<String>, csv_path: PathBuf, json_path: PathBuf) -> Self {
        Self {
            name: name.into(),
            csv_path,
            json_path,
        }
    }
}

impl DataSource for ResultsDirSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Option<Dataset>> {
        let table = match loader::load_csv(&self.csv_path) {
            Ok(table) => table,
            Err(DashboardError::MissingInput(path)) => {
                info!(source = self.name, path = %path.display(), "Input absent, trying next source");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        // A missing summary is not fatal; aggregates are recomputed instead.
        let summary = match loader::load_summary(&self.json_path) {
            Ok(summary) => Some(summary),
            Err(DashboardError::MissingInput(path)) => {
                warn!(source = self.name, path = %path.display(), "No summary file, recomputing aggregates");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Some(Dataset {
            records: table.records,
            skipped: table.skipped,
            summary,
        }))
    }
}

/// The dataset actually served, annotated with the provider that produced it
#[derive(Debug, Clone)]
pub struct ResolvedDataset {
    /// Name of the provider that served the data
    pub source: String,
    /// The dataset itself
    pub dataset: Dataset,
}

/// An ordered list of providers tried in sequence
pub struct SourceChain {
    sources: Vec<Box<dyn DataSource>>,
}

impl SourceChain {
    /// Create an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a provider to the end of the chain
    #[must_use]
    pub fn with(mut self, source: Box<dyn DataSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// The default chain: combined results, then single results, then demo data
    #[must_use]
    pub fn standard(combined_dir: &Path, single_dir: &Path) -> Self {
        Self::new()
            .with(Box::new(ResultsDirSource::new("combined", combined_dir)))
            .with(Box::new(ResultsDirSource::new("single", single_dir)))
            .with(Box::new(DemoSource::default()))
    }

    /// Walk the chain and return the first dataset a provider serves
    ///
    /// Returns `MissingInput` only when every provider signals absence,
    /// which cannot happen on a chain ending in the demo source.
    pub fn resolve(&self) -> Result<ResolvedDataset> {
        for source in &self.sources {
            if let Some(dataset) = source.fetch()? {
                info!(
                    source = source.name(),
                    records = dataset.records.len(),
                    skipped = dataset.skipped,
                    "Dataset resolved"
                );
                return Ok(ResolvedDataset {
                    source: source.name().to_string(),
                    dataset,
                });
            }
        }

        Err(DashboardError::MissingInput(PathBuf::from(
            "no data source available",
        )))
    }
}

impl Default for SourceChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AbsentSource;

    impl DataSource for AbsentSource {
        fn name(&self) -> &str {
            "absent"
        }

        fn fetch(&self) -> Result<Option<Dataset>> {
            Ok(None)
        }
    }

    #[test]
    fn test_empty_chain_is_missing_input() {
        let chain = SourceChain::new();
        assert!(matches!(
            chain.resolve(),
            Err(DashboardError::MissingInput(_))
        ));
    }

    #[test]
    fn test_chain_skips_absent_sources() {
        let chain = SourceChain::new()
            .with(Box::new(AbsentSource))
            .with(Box::new(DemoSource::with_seed(7)));
        let resolved = chain.resolve().unwrap();
        assert_eq!(resolved.source, "demo");
        assert!(!resolved.dataset.records.is_empty());
    }
}
