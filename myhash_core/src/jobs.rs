//! Concurrent hash jobs
//!
//! A `HashJob` is one digest over one file or over an ordered group of
//! files read as a single stream. `JobRunner` runs one task per job in a
//! `JoinSet`; every task owns its digest context outright. The only
//! shared mutable state is the `OutputSink`, which serializes whole lines.

use crate::error::{InternalError, ValidationError};
use crate::hashing::{HashAlgorithm, HashCalculator, HashResult};
use crate::{Error, HashConfig, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// One digest computation over one or more files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashJob {
    /// Position of the job in submission order
    pub id: usize,
    pub algorithm: HashAlgorithm,
    /// Files hashed as one concatenated stream, in order
    pub files: Vec<PathBuf>,
}

impl HashJob {
    pub fn new(id: usize, algorithm: HashAlgorithm, files: Vec<PathBuf>) -> Result<Self> {
        if files.is_empty() {
            return Err(ValidationError::EmptyJob.into());
        }
        Ok(Self {
            id,
            algorithm,
            files,
        })
    }

    /// A single job over the concatenation of `files`
    pub fn combined(algorithm: HashAlgorithm, files: Vec<PathBuf>) -> Result<Vec<Self>> {
        Ok(vec![Self::new(0, algorithm, files)?])
    }

    /// One independent job per file
    pub fn separate(algorithm: HashAlgorithm, files: Vec<PathBuf>) -> Result<Vec<Self>> {
        if files.is_empty() {
            return Err(ValidationError::EmptyJob.into());
        }
        files
            .into_iter()
            .enumerate()
            .map(|(id, file)| Self::new(id, algorithm, vec![file]))
            .collect()
    }

    /// Input files joined for display
    pub fn label(&self) -> String {
        self.files
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Finished job together with its digest or the reason it failed
#[derive(Debug)]
pub struct JobOutcome {
    pub job: HashJob,
    pub result: Result<HashResult>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Renders outcomes as single output lines, without the trailing newline
pub trait OutcomeFormatter: Send + Sync {
    fn format_success(&self, job: &HashJob, result: &HashResult) -> String;

    fn format_failure(&self, job: &HashJob, error: &Error) -> String;
}

struct Writers {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

/// Line-serialized destination for job results
///
/// Successful digests go to `out`, failure diagnostics to `err`. Both
/// writers sit behind one lock so a line is never split by another job.
pub struct OutputSink {
    writers: Mutex<Writers>,
    formatter: Box<dyn OutcomeFormatter>,
}

impl OutputSink {
    pub fn new(
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
        formatter: Box<dyn OutcomeFormatter>,
    ) -> Self {
        Self {
            writers: Mutex::new(Writers { out, err }),
            formatter,
        }
    }

    /// Sink writing to the process's stdout and stderr
    pub fn stdio(formatter: Box<dyn OutcomeFormatter>) -> Self {
        Self::new(
            Box::new(std::io::stdout()),
            Box::new(std::io::stderr()),
            formatter,
        )
    }

    /// Write one line for `outcome`
    pub fn emit(&self, outcome: &JobOutcome) -> Result<()> {
        let (line, to_err) = match &outcome.result {
            Ok(result) => (self.formatter.format_success(&outcome.job, result), false),
            Err(error) => (self.formatter.format_failure(&outcome.job, error), true),
        };

        // A panic while holding the lock cannot leave a half-written line behind
        let mut writers = self
            .writers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let writer = if to_err {
            &mut writers.err
        } else {
            &mut writers.out
        };
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Runs hash jobs concurrently, one task per job
#[derive(Debug, Clone)]
pub struct JobRunner {
    config: HashConfig,
    calculator: HashCalculator,
}

impl JobRunner {
    /// Create a runner; all jobs share one memory budget
    pub fn new(config: HashConfig) -> Result<Self> {
        config.validate()?;
        let calculator = HashCalculator::with_config(&config);
        Ok(Self { config, calculator })
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Hash every job and report each outcome through `sink`
    ///
    /// Job failures, including a result line that could not be written, are
    /// reported and returned as outcomes. Only a crashed
    /// worker fails the whole run; its siblings are aborted first.
    pub async fn run(&self, jobs: Vec<HashJob>, sink: Arc<OutputSink>) -> Result<Vec<JobOutcome>> {
        let calculator = self.calculator.clone();
        self.run_with(jobs, sink, move |job| {
            let calculator = calculator.clone();
            async move {
                let result = calculator.calculate_files(&job.files, job.algorithm).await;
                JobOutcome { job, result }
            }
        })
        .await
    }

    async fn run_with<F, Fut>(
        &self,
        jobs: Vec<HashJob>,
        sink: Arc<OutputSink>,
        work: F,
    ) -> Result<Vec<JobOutcome>>
    where
        F: Fn(HashJob) -> Fut,
        Fut: Future<Output = JobOutcome> + Send + 'static,
    {
        let ordered = self.config.ordered_output;
        let semaphore = self
            .config
            .max_concurrent_jobs
            .map(|limit| Arc::new(Semaphore::new(limit)));

        log::debug!(
            "Running {} job(s), concurrency limit {:?}, ordered output {}",
            jobs.len(),
            self.config.max_concurrent_jobs,
            ordered
        );

        let mut tasks = JoinSet::new();
        let mut task_jobs = HashMap::with_capacity(jobs.len());

        for job in jobs {
            let job_id = job.id;
            let semaphore = semaphore.clone();
            let sink = Arc::clone(&sink);
            let computation = work(job.clone());

            let handle = tasks.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => match semaphore.acquire_owned().await {
                        Ok(permit) => Some(permit),
                        Err(e) => {
                            return JobOutcome {
                                job,
                                result: Err(InternalError::worker_failed(job_id, e.to_string())
                                    .into()),
                            };
                        }
                    },
                    None => None,
                };

                log::debug!("Job {job_id} started");
                let mut outcome = computation.await;
                log_outcome(&outcome);

                if !ordered {
                    deliver(&sink, &mut outcome);
                }
                outcome
            });
            task_jobs.insert(handle.id(), job_id);
        }

        let mut outcomes = Vec::with_capacity(task_jobs.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, outcome)) => outcomes.push(outcome),
                Err(join_error) => {
                    let job = task_jobs.get(&join_error.id()).copied().unwrap_or_default();
                    log::error!("Worker for job {job} failed: {join_error}");

                    tasks.abort_all();
                    while tasks.join_next().await.is_some() {}

                    return Err(InternalError::worker_failed(job, join_error.to_string()).into());
                }
            }
        }

        if ordered {
            outcomes.sort_by_key(|outcome| outcome.job.id);
            for outcome in &mut outcomes {
                deliver(&sink, outcome);
            }
        }

        Ok(outcomes)
    }
}

/// Emit `outcome`, turning a digest that could not be written into the
/// job's error
///
/// The write error is then reported on the error stream. A job that had
/// already failed keeps its original error.
fn deliver(sink: &OutputSink, outcome: &mut JobOutcome) {
    let Err(write_error) = sink.emit(outcome) else {
        return;
    };
    log::debug!("Failed to write result of job {}: {write_error}", outcome.job.id);

    if outcome.is_success() {
        outcome.result = Err(write_error);
        if let Err(e) = sink.emit(outcome) {
            log::warn!("Failed to report write error for job {}: {e}", outcome.job.id);
        }
    }
}

fn log_outcome(outcome: &JobOutcome) {
    match &outcome.result {
        Ok(result) => log::debug!(
            "Job {} finished: {} bytes in {:?}",
            outcome.job.id,
            result.input_size,
            result.duration
        ),
        Err(error) => log::debug!("Job {} ({}) failed: {error}", outcome.job.id, outcome.job.label()),
    }
}
