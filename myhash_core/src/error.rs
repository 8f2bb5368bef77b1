//! Error types for the myhash core library
//!
//! Errors are grouped the way a job fails: the byte source broke, the
//! request was malformed, or the library could not complete the work.

use thiserror::Error;

pub mod internal;
pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;
pub use internal::InternalError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the myhash core library
///
/// - I/O errors: opening or reading an input file
/// - Validation errors: unknown algorithm, bad parameters, wrong buffer length
/// - Internal errors: memory limit, allocation failure, crashed worker
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Internal library errors
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Whether only the job that produced this error is affected
    pub fn is_job_local(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Validation(_) => false,
            Self::Internal(internal) => internal.is_recoverable(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}
