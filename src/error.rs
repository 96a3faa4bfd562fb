//! Error types for spockctrl operations.
//!
//! This module defines [`SpockctrlError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Remote SQL failures never surface as errors from the executor; they are
//!   classified by the step runner and only a fatal one becomes
//!   [`SpockctrlError::StepFailed`]
//! - Configuration problems are reported before any statement is executed
//! - Use `anyhow::Error` (via `SpockctrlError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for spockctrl operations.
#[derive(Debug, Error)]
pub enum SpockctrlError {
    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A step that is not allowed to fail returned a non-zero exit code.
    #[error("Step failed: {description}")]
    StepFailed {
        index: usize,
        description: String,
        stderr: String,
    },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpockctrlError {
    /// Process exit code for this error.
    ///
    /// Step failures exit with 1, configuration problems with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            SpockctrlError::ConfigNotFound { .. }
            | SpockctrlError::ConfigParseError { .. }
            | SpockctrlError::ConfigValidationError { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for spockctrl operations.
pub type Result<T> = std::result::Result<T, SpockctrlError>;
