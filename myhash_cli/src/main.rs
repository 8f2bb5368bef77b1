use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser, ValueEnum};
use myhash_cli::{CliError, CliOverrides, ConfigManager, ExitCode, OutputFormat, formatter_for};
use myhash_core::{AlgorithmRegistry, HashAlgorithm, HashJob, JobRunner, OutputSink};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "myhash")]
#[command(author, version, about = "Compute MD5 and SHA-256 digests of files", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["combined", "separate"])))]
struct Cli {
    /// Hash all files as one concatenated stream
    #[arg(short = 'c', value_enum, value_name = "ALGO")]
    combined: Option<AlgorithmArg>,

    /// Hash every file on its own, concurrently
    #[arg(short = 's', value_enum, value_name = "ALGO")]
    separate: Option<AlgorithmArg>,

    /// Files to hash
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print results in command line order once every job has finished
    #[arg(long)]
    ordered: bool,

    /// Maximum number of jobs hashing at the same time
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Bytes read from a file per chunk
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Md5,
    Sha256,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Md5 => HashAlgorithm::MD5,
            AlgorithmArg::Sha256 => HashAlgorithm::SHA256,
        }
    }
}

impl Cli {
    fn command_with_algorithms() -> clap::Command {
        Self::command().after_help(format!(
            "Algorithms: {}",
            AlgorithmRegistry::list().join(", ")
        ))
    }

    /// Parse the process arguments, exiting with usage on error
    fn parse_args() -> Self {
        let matches = Self::command_with_algorithms().get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            chunk_size: self.chunk_size,
            jobs: self.jobs,
            ordered: self.ordered,
            format: self.format,
        }
    }

    /// Turn the mode flag and file list into jobs
    fn jobs(&self) -> Result<(Vec<HashJob>, bool), CliError> {
        let files = self.files.clone();
        match (self.combined, self.separate) {
            (Some(algorithm), None) => Ok((HashJob::combined(algorithm.into(), files)?, false)),
            (None, Some(algorithm)) => Ok((HashJob::separate(algorithm.into(), files)?, true)),
            _ => Err(CliError::Misuse(
                "exactly one of -c or -s must be given".to_string(),
            )),
        }
    }
}

fn init_logging(debug: bool) {
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("myhash_core", log::LevelFilter::Debug)
            .filter_module("myhash_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let manager = ConfigManager::new();
    let mut config = manager.load()?;
    config.apply_cli_overrides(&cli.overrides());
    log::debug!("Effective configuration: {config:?}");

    let (jobs, with_paths) = cli.jobs()?;
    let runner = JobRunner::new(config.hash)?;
    let sink = Arc::new(OutputSink::stdio(formatter_for(
        config.output.format,
        with_paths,
    )));

    let outcomes = runner.run(jobs, sink).await?;

    Ok(ExitCode::from_outcomes(&outcomes))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.format_for_user());
            error.exit_code()
        }
    };

    std::process::exit(code.code());
}
