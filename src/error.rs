use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Extraction error for '{field}': {reason}")]
    Extraction { field: String, reason: String },

    #[error("Invalid locator for '{field}': {reason}")]
    InvalidLocator { field: String, reason: String },

    #[error("Missing field in extracted values: {0}")]
    MissingField(String),

    #[error("Invalid numeric value for '{field}': {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),
}

impl ExporterError {
    pub(crate) fn extraction(field: &str, reason: impl Into<String>) -> Self {
        Self::Extraction {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
