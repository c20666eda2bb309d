//! Error types for the tg-coding-dashboard library.
//!
//! This module provides custom error types using `thiserror` for better error
//! handling and more specific error messages throughout the crate. Aggregation
//! itself never fails; only loading and configuration can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the tg-coding-dashboard crate.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Expected input file is absent; callers fall back to the next source
    #[error("Missing input file: {0}")]
    MissingInput(PathBuf),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record failed required-field validation
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord {
        /// Identifier of the offending record, if known
        id: String,
        /// What the record got wrong
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
