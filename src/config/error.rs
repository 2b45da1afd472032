//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Remote ratio is outside `[0.0, 1.0]`.
    #[error("invalid remote ratio {value}: must be between 0.0 and 1.0")]
    InvalidRatio { value: f64 },

    /// Encoder batch size must be at least one.
    #[error("invalid batch size 0: must be at least 1")]
    InvalidBatchSize,

    /// Device preference is not one of `cpu`, `cuda`, `metal`.
    #[error("invalid device '{value}': expected cpu, cuda or metal")]
    InvalidDevice { value: String },

    /// Encoder identifier is empty.
    #[error("encoder name cannot be empty")]
    EmptyEncoderName,
}
