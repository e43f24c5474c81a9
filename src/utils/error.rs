use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemapError {
    #[error("Invalid selector '{selector}': {reason}")]
    SelectorSyntaxError { selector: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, RemapError>;
