//! Layered error definitions
//!
//! Categorized by source: config / base time / warp table

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Base Time Errors =====
    /// Base time value is not an ISO-8601 instant
    #[error("invalid base time '{value}': {message}")]
    InvalidBaseTime { value: String, message: String },

    // ===== Warp Errors =====
    /// Warp rate table violates its ordering rules
    #[error("invalid warp rate table {rates:?}: {message}")]
    InvalidWarpTable { rates: Vec<f64>, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create base time error
    pub fn invalid_base_time(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBaseTime {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create warp table error
    pub fn invalid_warp_table(rates: &[f64], message: impl Into<String>) -> Self {
        Self::InvalidWarpTable {
            rates: rates.to_vec(),
            message: message.into(),
        }
    }
}
