//! Builders for test input files

use myhash_core::Result;
use std::path::PathBuf;
use tempfile::TempDir;

/// Deterministic pseudo-random bytes derived from `seed`
///
/// Uses a linear congruential generator so the same `(size, seed)` pair
/// always yields the same content on every platform.
pub fn deterministic_bytes(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed ^ 0x9e37_79b9_7f4a_7c15;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

/// Test file builder for creating input files in a scratch directory
pub struct TestFileBuilder {
    base_dir: PathBuf,
    // Keeps the scratch directory alive for the builder's lifetime
    _temp_dir: TempDir,
    generated_files: Vec<PathBuf>,
}

impl TestFileBuilder {
    /// Create a builder backed by a fresh temporary directory
    pub fn temp() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        Ok(Self {
            base_dir: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
            generated_files: Vec::new(),
        })
    }

    /// Path a file called `name` would have, without creating it
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Write `content` to a file called `name`
    pub fn file_with_content(&mut self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        std::fs::write(&file_path, content)?;
        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Generate a deterministic file with specific size and seed
    pub fn deterministic_file(&mut self, name: &str, size: usize, seed: u64) -> Result<PathBuf> {
        self.file_with_content(name, &deterministic_bytes(size, seed))
    }

    /// Files created so far, in creation order
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// Clean up all generated files
    pub fn cleanup(&mut self) {
        for file_path in &self.generated_files {
            let _ = std::fs::remove_file(file_path);
        }
        self.generated_files.clear();
    }
}

impl Drop for TestFileBuilder {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_bytes_are_stable() {
        assert_eq!(deterministic_bytes(64, 1), deterministic_bytes(64, 1));
        assert_ne!(deterministic_bytes(64, 1), deterministic_bytes(64, 2));
        assert_eq!(deterministic_bytes(0, 1), Vec::<u8>::new());
    }

    #[test]
    fn test_builder_writes_and_cleans_up() {
        let mut builder = TestFileBuilder::temp().unwrap();
        let path = builder.deterministic_file("data.bin", 100, 7).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), deterministic_bytes(100, 7));
        assert_eq!(builder.generated_files(), &[path.clone()]);

        builder.cleanup();
        assert!(!path.exists());
    }
}
