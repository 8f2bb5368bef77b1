mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use myhash_core::jobs::OutcomeFormatter;
use serde::{Deserialize, Serialize};

/// Output format enumeration
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `NAME:hex`, followed by the file name when each file is its own job
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Build the formatter for a run
///
/// `with_paths` is set when every file is hashed separately, so each
/// line has to say which file it belongs to.
pub fn formatter_for(format: OutputFormat, with_paths: bool) -> Box<dyn OutcomeFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(with_paths)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
