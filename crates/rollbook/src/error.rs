//! Error types for rollbook.
//!
//! This module defines all error types used throughout the rollbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rollbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// No student with the requested id exists in the registry.
    #[error("student {id} not found")]
    StudentNotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// Caller-supplied input was rejected at the boundary.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the input.
        message: String,
    },

    // === Storage Errors ===
    /// The data file exists but could not be read or parsed.
    #[error("failed to read data file {path}: {source}")]
    DataFile {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for rollbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a data file error wrapping any underlying failure.
    #[must_use]
    pub fn data_file(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DataFile {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Check if this error means the requested student does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StudentNotFound { .. })
    }

    /// Check if this error was caused by bad caller input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::StudentNotFound { id: 7 };
        assert_eq!(err.to_string(), "student 7 not found");

        let err = Error::invalid_input("status must be Present or Absent");
        assert_eq!(
            err.to_string(),
            "invalid input: status must be Present or Absent"
        );
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::StudentNotFound { id: 1 }.is_not_found());
        assert!(!Error::internal("boom").is_not_found());
    }

    #[test]
    fn test_error_is_invalid_input() {
        assert!(Error::invalid_input("bad date").is_invalid_input());
        assert!(!Error::StudentNotFound { id: 1 }.is_invalid_input());
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_data_file_error_display() {
        let json_err = serde_json::from_str::<i32>("{").unwrap_err();
        let err = Error::data_file("/tmp/attendance_data.json", json_err);
        let msg = err.to_string();
        assert!(msg.contains("/tmp/attendance_data.json"));
        assert!(msg.contains("EOF"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "port must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("port must be greater than 0"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/forbidden"));
    }
}
