//! I/O related error types

use std::path::PathBuf;
use thiserror::Error;

/// I/O error with additional context
#[derive(Error, Debug)]
#[error("{}", format_io_error(self))]
pub struct IoError {
    /// The kind of I/O error
    pub kind: IoErrorKind,
    /// Path associated with the error (if any)
    pub path: Option<PathBuf>,
    /// Underlying I/O error (if any)
    #[source]
    pub source: Option<std::io::Error>,
}

/// Kind of I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoErrorKind {
    /// File not found
    FileNotFound,
    /// Permission denied
    PermissionDenied,
    /// Path names a directory instead of a file
    IsDirectory,
    /// Failure while reading an already opened source
    Read,
    /// Generic I/O error
    Other,
}

impl IoError {
    /// Create a file not found error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        Self {
            kind: IoErrorKind::FileNotFound,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: &std::path::Path, source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::PermissionDenied,
            path: Some(path.to_path_buf()),
            source: Some(source),
        }
    }

    /// Create an error for a path that is a directory
    pub fn is_directory(path: &std::path::Path) -> Self {
        Self {
            kind: IoErrorKind::IsDirectory,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Create a read failure error for an opened source
    pub fn read_failed(path: Option<&std::path::Path>, source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::Read,
            path: path.map(|p| p.to_path_buf()),
            source: Some(source),
        }
    }

    /// Classify an error returned while opening `path`
    pub fn open_failed(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::from_std(source).with_path(path)
    }

    /// Create an I/O error from a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            std::io::ErrorKind::IsADirectory => IoErrorKind::IsDirectory,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            path: None,
            source: Some(source),
        }
    }

    /// Create an I/O error with a path
    pub fn with_path(mut self, path: &std::path::Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn format_io_error(error: &IoError) -> String {
    match (&error.kind, &error.path) {
        (IoErrorKind::FileNotFound, Some(path)) => {
            format!("Failed to open file '{}': not found", path.display())
        }
        (IoErrorKind::FileNotFound, None) => "File not found".to_string(),
        (IoErrorKind::PermissionDenied, Some(path)) => {
            format!("Failed to open file '{}': permission denied", path.display())
        }
        (IoErrorKind::PermissionDenied, None) => "Permission denied".to_string(),
        (IoErrorKind::IsDirectory, Some(path)) => {
            format!("Failed to open file '{}': is a directory", path.display())
        }
        (IoErrorKind::IsDirectory, None) => "Is a directory".to_string(),
        (IoErrorKind::Read, path) => match (path, &error.source) {
            (Some(path), Some(source)) => {
                format!("Failed to read file '{}': {source}", path.display())
            }
            (Some(path), None) => format!("Failed to read file '{}'", path.display()),
            (None, Some(source)) => format!("Read error: {source}"),
            (None, None) => "Read error".to_string(),
        },
        (IoErrorKind::Other, path) => match (path, &error.source) {
            (Some(path), Some(source)) => format!("I/O error on '{}': {source}", path.display()),
            (_, Some(source)) => format!("I/O error: {source}"),
            _ => "I/O error".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_not_found_error() {
        let path = std::path::Path::new("/test/input.bin");
        let error = IoError::file_not_found(path);

        assert_eq!(error.kind, IoErrorKind::FileNotFound);
        assert_eq!(error.path, Some(path.to_path_buf()));
        assert!(error.source.is_none());
        assert!(error.to_string().contains("Failed to open file"));
        assert!(error.to_string().contains("/test/input.bin"));
    }

    #[test]
    fn test_permission_denied_error() {
        let path = std::path::Path::new("/root/protected.bin");
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = IoError::permission_denied(path, io_error);

        assert_eq!(error.kind, IoErrorKind::PermissionDenied);
        assert!(error.source.is_some());
        assert!(error.to_string().contains("permission denied"));
        assert!(error.to_string().contains("/root/protected.bin"));
    }

    #[test]
    fn test_read_failed_keeps_cause() {
        let path = std::path::Path::new("/dev/flaky");
        let error = IoError::read_failed(Some(path), io::Error::other("device went away"));

        assert_eq!(error.kind, IoErrorKind::Read);
        assert!(error.to_string().contains("Failed to read file"));
        assert!(error.to_string().contains("device went away"));
    }

    #[test]
    fn test_open_failed_classifies_not_found() {
        let path = std::path::Path::new("/missing");
        let error = IoError::open_failed(path, io::Error::new(io::ErrorKind::NotFound, "gone"));

        assert_eq!(error.kind, IoErrorKind::FileNotFound);
        assert_eq!(error.path, Some(path.to_path_buf()));
    }

    #[test]
    fn test_with_path() {
        let io_error = io::Error::other("Generic error");
        let path = std::path::Path::new("/test.bin");
        let error = IoError::from_std(io_error).with_path(path);

        assert_eq!(error.kind, IoErrorKind::Other);
        assert_eq!(error.path, Some(path.to_path_buf()));
        assert!(error.to_string().contains("/test.bin"));
    }
}
