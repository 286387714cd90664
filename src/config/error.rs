use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("missing required configuration property: {name}")]
    MissingRequired { name: String },

    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse env file '{path}': {source}")]
    EnvParse {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("invalid JSON content in config file '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to determine current working directory: {0}")]
    CurrentDir(std::io::Error),

    #[error("{operation} is not supported by {source_kind}")]
    Unsupported {
        operation: &'static str,
        source_kind: &'static str,
    },

    #[error("failed to deserialize settings: {0}")]
    DeserializeError(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns the setting name if this is a missing-required-property error.
    pub fn missing_property(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { name } => Some(name),
            _ => None,
        }
    }
}
