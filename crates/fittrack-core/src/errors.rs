// ABOUTME: Unified error handling for the FitTrack platform
// ABOUTME: Error codes, coarse error kinds, and AppError with constructor helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in `FitTrack` returns [`AppResult`]. Each
//! [`ErrorCode`] belongs to exactly one [`ErrorKind`], which is the coarse
//! taxonomy callers branch on:
//!
//! - `Validation`: user input or stored values outside their allowed range
//! - `Parse`: malformed JSON, unknown schema versions, malformed AI output
//! - `Network`: transport failures and non-success responses from AI endpoints
//! - `Storage`: the key/value backend could not be read or written
//! - `Config`: missing or invalid environment configuration
//! - `Internal`: everything else

use std::error::Error as StdError;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation
    /// The provided input is invalid
    InvalidInput,
    /// A required field is missing
    MissingRequiredField,
    /// The provided value is outside the acceptable range
    ValueOutOfRange,
    /// The referenced record does not exist
    ResourceNotFound,

    // Parsing
    /// The data format is invalid
    InvalidFormat,
    /// Data serialization/deserialization failed
    SerializationError,
    /// A stored value carries a schema version this build cannot read
    UnsupportedSchemaVersion,

    // External services
    /// An external service returned an error
    ExternalServiceError,
    /// An external service could not be reached
    ExternalServiceUnavailable,
    /// Authentication with an external service failed
    ExternalAuthFailed,
    /// External service rate limit exceeded
    ExternalRateLimited,

    // Storage
    /// The storage backend failed
    StorageError,

    // Configuration
    /// Configuration error encountered
    ConfigError,
    /// Required configuration is missing
    ConfigMissing,
    /// Configuration is invalid
    ConfigInvalid,

    /// An internal error occurred
    InternalError,
}

/// Coarse error category used by callers to decide how to degrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input or stored value failed validation
    Validation,
    /// Malformed data or response payload
    Parse,
    /// Transport or remote service failure
    Network,
    /// Persistence backend failure
    Storage,
    /// Configuration problem
    Config,
    /// Unexpected internal failure
    Internal,
}

impl ErrorCode {
    /// Coarse category of this error code
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::ValueOutOfRange
            | Self::ResourceNotFound => ErrorKind::Validation,
            Self::InvalidFormat | Self::SerializationError | Self::UnsupportedSchemaVersion => {
                ErrorKind::Parse
            }
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalAuthFailed
            | Self::ExternalRateLimited => ErrorKind::Network,
            Self::StorageError => ErrorKind::Storage,
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid => ErrorKind::Config,
            Self::InternalError => ErrorKind::Internal,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested record was not found",
            Self::InvalidFormat => "The data format is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::UnsupportedSchemaVersion => "Stored data uses an unsupported schema version",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::StorageError => "Storage operation failed",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Parse => "parse",
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Coarse category of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Value outside of its allowed range
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Record not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Malformed payload
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Stored value with a schema version newer than this build understands
    #[must_use]
    pub fn unsupported_version(key: &str, version: u64) -> Self {
        Self::new(
            ErrorCode::UnsupportedSchemaVersion,
            format!("Value under '{key}' has unsupported schema version {version}"),
        )
    }

    /// Remote endpoint could not be reached
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceUnavailable, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service rejected our credentials
    #[must_use]
    pub fn external_auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalAuthFailed, message)
    }

    /// Storage backend failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Invalid configuration value
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        // Request URLs can carry credentials in their query string
        let error = error.without_url();
        let code = if error.is_connect() || error.is_timeout() {
            ErrorCode::ExternalServiceUnavailable
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::new(code, format!("HTTP request failed: {error}")).with_source(error)
    }
}
