//! CLI error type and semantic exit codes

use myhash_core::JobOutcome;
use thiserror::Error;

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    FilesystemError = 4,
}

impl ExitCode {
    /// Numeric process status
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Status for a finished run
    ///
    /// Any failed read or open wins over other failures, since it is the
    /// one the user can most likely fix.
    pub fn from_outcomes(outcomes: &[JobOutcome]) -> Self {
        outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err())
            .map(|error| match error {
                myhash_core::Error::Io(_) => Self::FilesystemError,
                _ => Self::GeneralError,
            })
            .max_by_key(|code| code.code())
            .unwrap_or(Self::Success)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

/// Errors that stop a run before or while jobs execute
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line or configuration asked for something invalid
    #[error("{0}")]
    Misuse(String),

    #[error(transparent)]
    Core(#[from] myhash_core::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Misuse(_) => ExitCode::Misuse,
            Self::Core(myhash_core::Error::Validation(_)) => ExitCode::Misuse,
            Self::Core(myhash_core::Error::Io(_)) => ExitCode::FilesystemError,
            Self::Core(_) | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Render the error and its causes for stderr
    pub fn format_for_user(&self) -> String {
        let mut output = format!("Error: {self}");

        if let Self::Other(error) = self {
            for cause in error.chain().skip(1) {
                output.push_str(&format!("\n  Caused by: {cause}"));
            }
        }
        if matches!(self, Self::Misuse(_) | Self::Core(myhash_core::Error::Validation(_))) {
            output.push_str("\n\nRun 'myhash --help' for usage information");
        }

        output
    }
}
