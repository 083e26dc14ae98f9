//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Parsing and policy evaluation never fail; only I/O around them does.

use thiserror::Error;

/// Errors that can occur while loading a configuration document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    TomlParseFailed(#[from] toml::de::Error),

    #[error("Config JSON parse error: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("Invalid config document: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while reading an error input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Input is empty")]
    Empty,
}

/// Errors that can occur during output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
