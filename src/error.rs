// Example using thiserror
use crate::data_model::Document;
use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for pipeline operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Decompression error: {0}")]
    DecompressionError(String),

    #[error("Record exceeds maximum length of {limit} bytes")]
    RecordTooLarge { limit: usize },

    #[error("Malformed record '{snippet}': {source}")]
    MalformedRecord {
        snippet: String,
        source: serde_json::Error,
    },

    #[error("Record is missing required field '{field}'")]
    MissingField { field: String },

    #[error("Field '{field}' is not a string value")]
    FieldNotString { field: String },

    #[error("Failed to encode record: {source}")]
    EncodingError { source: serde_json::Error },

    // Not a user-visible failure: the driver unwraps this into a dropped
    // record. Every other variant aborts the stream.
    #[error("Record filtered out: {reason}")]
    RecordFiltered { document: Document, reason: String },

    #[error("Error in pipeline stage '{step_name}': {source}")]
    StepError {
        step_name: String,
        source: Box<PipelineError>,
    },

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

// reqwest::Error carries connection/TLS detail we only ever report as a
// string, so map it where it crosses into our error type.
impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::TransportError(err.to_string())
    }
}
