//! Library side of the `myhash` binary: configuration, output formatting
//! and exit codes.

pub mod config;
pub mod error;
pub mod output;

pub use config::{AppConfig, CliOverrides, ConfigManager};
pub use error::{CliError, ExitCode};
pub use output::{OutputFormat, formatter_for};
