//! All error types for the langsync crate.
//!
//! Every fallible operation (reading sources, indexing targets, merging,
//! committing) returns these. The transaction controller folds them into a
//! [`crate::SyncOutcome`] so a failed run never panics the host.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Location label used when an entry comes from an in-memory reader.
pub const UNKNOWN_LOCATION: &str = "<input>";

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed entry at {location}:{line}: `{text}` has no quoted key")]
    MalformedEntry {
        location: String,
        line: usize,
        text: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on `{}`: {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conflicting targets: {0}")]
    TargetConflict(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Creates a malformed-entry error for a line read from an unnamed reader.
    pub fn malformed(line: usize, text: impl Into<String>) -> Self {
        Error::MalformedEntry {
            location: UNKNOWN_LOCATION.to_string(),
            line,
            text: text.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_at(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::IoAt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attaches a file path to errors that were produced without one.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            Error::MalformedEntry { line, text, .. } => Error::MalformedEntry {
                location: path.as_ref().display().to_string(),
                line,
                text,
            },
            Error::Io(source) => Error::io_at(path, source),
            other => other,
        }
    }

    /// Sets the 1-based line number of a malformed-entry error.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Error::MalformedEntry { location, text, .. } => Error::MalformedEntry {
                location,
                line,
                text,
            },
            other => other,
        }
    }

    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_malformed_entry_without_path() {
        let error = Error::malformed(3, "<string>oops</string>");
        assert_eq!(
            error.to_string(),
            "malformed entry at <input>:3: `<string>oops</string>` has no quoted key"
        );
    }

    #[test]
    fn test_malformed_entry_with_path() {
        let error = Error::malformed(7, "<string>x</string>").with_path("res/values/strings.xml");
        assert_eq!(
            error.to_string(),
            "malformed entry at res/values/strings.xml:7: `<string>x</string>` has no quoted key"
        );
    }

    #[test]
    fn test_at_line_then_with_path() {
        let error = Error::malformed(0, "<string>x</string>")
            .at_line(12)
            .with_path("values-de/strings.xml");
        match error {
            Error::MalformedEntry { location, line, .. } => {
                assert_eq!(location, "values-de/strings.xml");
                assert_eq!(line, 12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_io_error_keeps_os_message() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let error = Error::Io(io_error).with_path("values-fr/strings.xml");
        let display = error.to_string();
        assert!(display.contains("values-fr/strings.xml"));
        assert!(display.contains("No such file or directory"));
        assert!(matches!(error, Error::IoAt { .. }));
    }

    #[test]
    fn test_with_path_leaves_other_errors_alone() {
        let error = Error::TargetConflict("a and b".to_string()).with_path("x.xml");
        assert_eq!(error.to_string(), "conflicting targets: a and b");
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation_error("temp file name is empty");
        assert_eq!(
            error.to_string(),
            "validation error: temp file name is empty"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidResource("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidResource"));
        assert!(debug.contains("test"));
    }
}
