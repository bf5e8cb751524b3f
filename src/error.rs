use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Predictions file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Problems confined to a single data row. The loader records these as
/// diagnostics and moves on to the next row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("missing cell for column '{column}'")]
    MissingCell { column: String },

    #[error("malformed record: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
