use thiserror::Error;

pub type MarkupResult<T> = Result<T, MarkupError>;

/// Errors raised around the markup core.
///
/// Parsing itself never fails; these cover configuration, file access and
/// the navigation collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("YAML error: {0}")]
    YamlError(String),

    #[error("Invalid config value for '{field}': {reason}")]
    InvalidConfigValue { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Navigation to '{url}' failed: {reason}")]
    NavigationFailed { url: String, reason: String },
}

impl From<serde_yaml::Error> for MarkupError {
    fn from(err: serde_yaml::Error) -> Self {
        MarkupError::YamlError(err.to_string())
    }
}
