//! Error types for seedgen-storage

use std::fmt;
use thiserror::Error;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Artifact id was already written (artifacts are write-once)
    AlreadyExists,
    /// Artifact id cannot be turned into a file name
    InvalidId,
    /// I/O errors
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidId => "invalid_id",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn already_exists(artifact_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::AlreadyExists,
            format!("Artifact already written: {}", artifact_id),
        )
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidId, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<tempfile::PersistError> for StorageError {
    fn from(err: tempfile::PersistError) -> Self {
        StorageError::io(format!("Atomic rename failed: {}", err.error)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = StorageError::already_exists("Foo_p0");
        let msg = format!("{}", err);
        assert!(msg.contains("already_exists"));
        assert!(msg.contains("Foo_p0"));
    }

    #[test]
    fn test_invalid_id_error() {
        let err = StorageError::invalid_id("empty function name");
        assert_eq!(err.kind, ErrorKind::InvalidId);
        assert!(err.source.is_none());
        assert_eq!(format!("{}", err), "[invalid_id] empty function name");
    }

    #[test]
    fn test_from_io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only fs");
        let err: StorageError = io_err.into();

        assert_eq!(err.kind, ErrorKind::IO);
        let source = err.source().unwrap();
        assert!(source.to_string().contains("read-only fs"));
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::AlreadyExists.as_str(), "already_exists");
        assert_eq!(ErrorKind::InvalidId.as_str(), "invalid_id");
        assert_eq!(ErrorKind::IO.as_str(), "io");
    }

    #[test]
    fn test_result_propagation() {
        fn inner() -> Result<()> {
            Err(StorageError::already_exists("X_p1"))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        let err = outer().unwrap_err();
        assert_eq!(err.kind, ErrorKind::AlreadyExists);
    }
}
