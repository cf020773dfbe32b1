//! Error types for the forecast_board crate

use forecast_math::MathError;
use survey_scores::ScoreError;
use thiserror::Error;

/// Custom error types for the forecast_board crate
#[derive(Debug, Error)]
pub enum BoardError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// A requested matrix row does not exist
    #[error("Unknown row: {0}")]
    UnknownRow(String),

    /// Uploaded matrix labels do not cover the expected hierarchy labels
    #[error(
        "Matrix does not match the expected labels (missing rows: {missing_rows:?}, missing columns: {missing_columns:?})"
    )]
    LabelMismatch {
        missing_rows: Vec<String>,
        missing_columns: Vec<String>,
    },

    /// Error from invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error while installing the log subscriber
    #[error("Telemetry error: {0}")]
    Telemetry(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON parsing or encoding
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from forecaster configuration
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from survey data preparation
    #[error("Score error: {0}")]
    ScoreError(#[from] ScoreError),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, BoardError>;
