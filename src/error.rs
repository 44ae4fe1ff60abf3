use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::query::ValidationError;

/// Application-wide error type for the disco CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Image file '{}' does not exist", .0.display())]
    ImageFileNotFound(PathBuf),

    #[error("Failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode YAML report: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }
}
