use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub aggregation: AggregationConfig,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

/// Where the analysis result files live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Combined-dataset results directory (preferred)
    pub combined_dir: String,
    /// Single-dataset results directory (fallback)
    pub single_dir: String,
}

/// Defaults for the aggregate views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Top-N limit for the subcategory ranking
    pub top_subcategories: usize,
    /// Top-N limit for the linguistic marker ranking
    pub top_markers: usize,
    /// Bin count for the views histogram
    pub views_bins: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

/// Demo-mode dataset generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// RNG seed for reproducible demo data
    pub seed: u64,
    /// Number of synthetic records to generate
    pub record_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                combined_dir: "../combined_analysis_results".to_string(),
                single_dir: "../telegram_analysis_results".to_string(),
            },
            aggregation: AggregationConfig {
                top_subcategories: 10,
                top_markers: 15,
                views_bins: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            demo: DemoConfig {
                seed: 42,
                record_count: 1_315,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    ///
    /// Defaults, then `config/default` and `config/local` files if present,
    /// then `TG_DASHBOARD_*` environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| anyhow::anyhow!("Failed to build default configuration: {e}"))?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("TG_DASHBOARD").separator("__"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {e}"))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.data.combined_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("combined_dir cannot be empty"));
        }
        if self.data.single_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("single_dir cannot be empty"));
        }

        if self.aggregation.top_subcategories == 0 {
            return Err(anyhow::anyhow!("top_subcategories must be greater than 0"));
        }
        if self.aggregation.top_markers == 0 {
            return Err(anyhow::anyhow!("top_markers must be greater than 0"));
        }
        if self.aggregation.views_bins == 0 {
            return Err(anyhow::anyhow!("views_bins must be greater than 0"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        if self.demo.record_count == 0 {
            return Err(anyhow::anyhow!("demo record_count must be greater than 0"));
        }

        Ok(())
    }

    /// Combined results directory as a path
    #[must_use]
    pub fn combined_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.combined_dir)
    }

    /// Single-dataset results directory as a path
    #[must_use]
    pub fn single_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.single_dir)
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}
