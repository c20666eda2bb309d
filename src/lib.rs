//! Telegram Coding Dashboard - Aggregation Core
//!
//! A Rust library providing the data layer of a research dashboard over
//! DMCA Thematic Coding analysis results: loading coded message records and
//! precomputed summaries, and deriving every aggregate the dashboard's
//! charts display.
//!
//! # Features
//!
//! - CSV record table and JSON summary loading with graceful row skipping
//! - Category, subcategory, intensity, engagement, marker, media, and
//!   temporal aggregations
//! - Ordered data-source fallback chain (combined -> single -> demo)
//! - Deterministic synthetic demo dataset

/// The aggregation core: pure transforms over record tables
pub mod aggregate;
/// Configuration management
pub mod config;
/// Synthetic demo dataset generation
pub mod demo;
/// Error types
pub mod error;
/// Record filtering for the explorer view
pub mod filter;
/// CSV and JSON input loading
pub mod loader;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Data-source providers and the fallback chain
pub mod source;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use error::{DashboardError, Result};
pub use filter::RecordFilter;
pub use models::{AnalysisSummary, Category, Dataset, Granularity, MessageRecord};
pub use source::{DataSource, SourceChain};
