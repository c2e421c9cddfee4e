// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaltError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Malformed salt document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date key: {0}")]
    InvalidDate(String),

    #[error("Unsupported schedule: {0}")]
    Schedule(String),

    #[error("Salt generation failed: {0}")]
    Generation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, SaltError>;
