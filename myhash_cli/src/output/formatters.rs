use myhash_core::jobs::OutcomeFormatter;
use myhash_core::{Error, HashJob, HashResult};
use serde_json::json;

/// Text formatter for human-readable output
pub struct TextFormatter {
    with_paths: bool,
}

impl TextFormatter {
    pub fn new(with_paths: bool) -> Self {
        Self { with_paths }
    }
}

impl OutcomeFormatter for TextFormatter {
    fn format_success(&self, job: &HashJob, result: &HashResult) -> String {
        let name = job.algorithm.display_name();
        if self.with_paths {
            format!("{name}:{}  {}", result.digest, job.label())
        } else {
            format!("{name}:{}", result.digest)
        }
    }

    fn format_failure(&self, _job: &HashJob, error: &Error) -> String {
        format!("Error: {error}")
    }
}

/// JSON formatter, one compact object per job
pub struct JsonFormatter;

fn file_names(job: &HashJob) -> Vec<String> {
    job.files.iter().map(|p| p.display().to_string()).collect()
}

impl OutcomeFormatter for JsonFormatter {
    fn format_success(&self, job: &HashJob, result: &HashResult) -> String {
        json!({
            "algorithm": job.algorithm.to_string(),
            "digest": result.hash(),
            "files": file_names(job),
            "bytes": result.input_size,
        })
        .to_string()
    }

    fn format_failure(&self, job: &HashJob, error: &Error) -> String {
        json!({
            "algorithm": job.algorithm.to_string(),
            "files": file_names(job),
            "error": error.to_string(),
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myhash_core::error::IoError;
    use myhash_core::{HashAlgorithm, HashCalculator};
    use serde_json::Value;
    use std::path::{Path, PathBuf};

    fn job(algorithm: HashAlgorithm, files: &[&str]) -> HashJob {
        HashJob::new(0, algorithm, files.iter().map(PathBuf::from).collect()).unwrap()
    }

    fn abc(algorithm: HashAlgorithm) -> HashResult {
        HashCalculator::new().calculate_bytes(algorithm, b"abc").unwrap()
    }

    #[test]
    fn test_text_combined_has_no_path() {
        let formatter = TextFormatter::new(false);
        let job = job(HashAlgorithm::MD5, &["a.txt", "b.txt"]);

        assert_eq!(
            formatter.format_success(&job, &abc(HashAlgorithm::MD5)),
            "MD5:900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_text_separate_appends_path() {
        let formatter = TextFormatter::new(true);
        let job = job(HashAlgorithm::SHA256, &["abc.txt"]);

        assert_eq!(
            formatter.format_success(&job, &abc(HashAlgorithm::SHA256)),
            "SHA256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad  abc.txt"
        );
    }

    #[test]
    fn test_text_failure_names_the_file() {
        let formatter = TextFormatter::new(true);
        let job = job(HashAlgorithm::MD5, &["gone.bin"]);
        let error = Error::Io(IoError::file_not_found(Path::new("gone.bin")));

        let line = formatter.format_failure(&job, &error);
        assert!(line.starts_with("Error: "));
        assert!(line.contains("gone.bin"));
    }

    #[test]
    fn test_json_success_fields() {
        let job = job(HashAlgorithm::MD5, &["a.txt", "b.txt"]);
        let line = JsonFormatter.format_success(&job, &abc(HashAlgorithm::MD5));
        assert!(!line.contains('\n'));

        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["algorithm"], "md5");
        assert_eq!(value["digest"], "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(value["files"], json!(["a.txt", "b.txt"]));
        assert_eq!(value["bytes"], 3);
    }

    #[test]
    fn test_json_failure_fields() {
        let job = job(HashAlgorithm::SHA256, &["gone.bin"]);
        let error = Error::Io(IoError::file_not_found(Path::new("gone.bin")));

        let value: Value = serde_json::from_str(&JsonFormatter.format_failure(&job, &error)).unwrap();
        assert_eq!(value["algorithm"], "sha256");
        assert!(value["error"].as_str().unwrap().contains("gone.bin"));
        assert!(value.get("digest").is_none());
    }
}
