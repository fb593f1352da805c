//! Application error hierarchy.
//!
//! Every error converts into [`AppError`]; `user_message()` gives a short,
//! non-technical message for the command line while `Display` keeps the
//! full detail for logs.

use thiserror::Error;
use wxindex_engine::IndexError;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Index(e) => index_user_message(e),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

fn index_user_message(error: &IndexError) -> &'static str {
    match error {
        IndexError::InvalidInput { .. } => "The observation contains an invalid value.",
        IndexError::TableLookupMiss { .. } => {
            "The reference tables are incomplete. Check your table file."
        }
        IndexError::TableLoad(_) => "The reference tables could not be loaded.",
        IndexError::Observation(_) => "The observation could not be read.",
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}
