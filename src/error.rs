//! Error types shared by every pipeline stage.

use std::path::PathBuf;

/// Errors raised while loading, converting, deriving or reporting timestamps.
///
/// Every variant aborts the current run; there is no partial-result mode.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Expected exactly one column in the input table, found {0}")]
    Shape(usize),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Column '{column}' must hold date-time values, found {found} values")]
    Type { column: String, found: &'static str },

    #[error("'{0}' is not a supported chart kind")]
    InvalidKind(String),

    #[error("Failed to generate timestamps: {0}")]
    Generation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Parse(err.to_string())
    }
}
