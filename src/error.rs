use thiserror::Error;

use crate::plan::RejectionReport;

#[derive(Debug, Error)]
pub enum ScoresafeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("File is too large ({size} bytes; max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Duplicate unit in catalog: {0}")]
    DuplicateUnit(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error(transparent)]
    Rejected(#[from] RejectionReport),
}
