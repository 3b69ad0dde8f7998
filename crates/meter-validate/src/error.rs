use thiserror::Error;

/// Structural failures that abort a whole validation run.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The batch lacks columns the variant requires.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ValidateError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidateError>;
