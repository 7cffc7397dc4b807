//! Error types for soultrip.
//!
//! This module defines the error type shared by the storage layer, the
//! configuration loader and the services behind the website. The HTTP layer
//! turns these into responses in `web::error`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for soultrip operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
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

    // === Domain Errors ===
    /// Input from a form or API call was rejected.
    #[error("{message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// A record does not exist.
    #[error("{entity} not found")]
    NotFound {
        /// Human readable name of the record kind.
        entity: &'static str,
    },

    /// The operation conflicts with existing data.
    #[error("{message}")]
    Conflict {
        /// Description of the conflict.
        message: String,
    },

    // === Upload Errors ===
    /// An uploaded file was refused.
    #[error("{message}")]
    UploadRejected {
        /// Why the upload was refused.
        message: String,
        /// Whether the refusal was caused by the size limit.
        too_large: bool,
    },

    // === Mail Errors ===
    /// Sending an email failed.
    #[error("mail delivery failed: {0}")]
    Mail(String),

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

/// A specialized Result type for soultrip operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for the given record kind.
    #[must_use]
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Create a new conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an upload rejection.
    #[must_use]
    pub fn upload_rejected(message: impl Into<String>) -> Self {
        Self::UploadRejected {
            message: message.into(),
            too_large: false,
        }
    }

    /// Create an upload rejection caused by the size limit.
    #[must_use]
    pub fn upload_too_large(limit_bytes: usize) -> Self {
        Self::UploadRejected {
            message: format!("File too large (limit is {limit_bytes} bytes)"),
            too_large: true,
        }
    }

    /// Create a new mail error.
    #[must_use]
    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail(message.into())
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by caller input rather than the server.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::Conflict { .. }
                | Self::UploadRejected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("Tour");
        assert_eq!(err.to_string(), "Tour not found");

        let err = Error::validation("Name is required");
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::not_found("Booking").is_not_found());
        assert!(!Error::internal("boom").is_not_found());
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::validation("bad").is_client_error());
        assert!(Error::conflict("busy").is_client_error());
        assert!(Error::upload_rejected("nope").is_client_error());
        assert!(!Error::mail("smtp down").is_client_error());
        assert!(!Error::internal("bug").is_client_error());
    }

    #[test]
    fn test_upload_too_large_message() {
        let err = Error::upload_too_large(5 * 1024 * 1024);
        assert!(err.to_string().contains("5242880"));
        assert!(matches!(err, Error::UploadRejected { too_large: true, .. }));
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_mail_error() {
        let err = Error::mail("connection refused");
        assert_eq!(err.to_string(), "mail delivery failed: connection refused");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
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
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "port must not be 0".to_string(),
        };
        assert!(err.to_string().contains("port must not be 0"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
