use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Row source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Missing required parameter: {parameter}")]
    InvalidArgument { parameter: String },

    #[error("No hospital found with id '{id}'")]
    NotFound { id: String },

    #[error("Row {row} could not be processed: {reason}")]
    RowProcessing { row: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl DirectoryError {
    pub fn invalid_argument(parameter: &str) -> Self {
        DirectoryError::InvalidArgument {
            parameter: parameter.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
