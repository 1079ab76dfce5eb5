use std::path::PathBuf;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Dataset or model artifacts absent at startup
    #[error("Missing required files: {}", format_paths(.0))]
    MissingPrerequisites(Vec<PathBuf>),

    /// Feature vector malformed at prediction time
    #[error("Validation error: {0}")]
    Validation(String),

    /// Training data lacks required columns or values
    #[error("Data shape error: {0}")]
    DataShape(String),

    /// Label or code outside the fitted label set
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Session operation out of order
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Classifier fit/predict failures
    #[error("Model error: {0}")]
    Model(String),
}

impl AppError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::MissingPrerequisites(_) => "MISSING_PREREQUISITES",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DataShape(_) => "DATA_SHAPE_ERROR",
            AppError::UnknownLabel(_) => "UNKNOWN_LABEL",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Model(_) => "MODEL_ERROR",
        }
    }

    /// Whether the error ends the interactive session
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::MissingPrerequisites(_) | AppError::Configuration(_) | AppError::Io(_)
        )
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from bincode::Error
impl From<bincode::Error> for AppError {
    fn from(err: bincode::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from csv::Error
impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
