//! Error types for puremark library.

use std::io;
use thiserror::Error;

/// Result type alias for puremark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting a markdown document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The markdown source produced no blocks to lay out.
    #[error("Document is empty: no markdown blocks to export")]
    EmptyDocument,

    /// The page geometry leaves no usable content area.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// Error serializing the finished document.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The requested export format is not registered.
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyDocument;
        assert_eq!(
            err.to_string(),
            "Document is empty: no markdown blocks to export"
        );

        let err = Error::UnknownFormat("docx".into());
        assert_eq!(err.to_string(), "Unknown export format: docx");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
