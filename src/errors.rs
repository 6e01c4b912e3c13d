use thiserror::Error;

/// Unified error type for the analysis and storage layers.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid window configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Record {record} is missing field `{field}`")]
    MissingField { field: &'static str, record: usize },
    #[error("Record {record} has an unconvertible `{field}` field: {message}")]
    TypeConversion {
        field: &'static str,
        record: usize,
        message: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
