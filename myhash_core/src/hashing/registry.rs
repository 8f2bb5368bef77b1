//! Central registry for hash algorithm implementations
//!
//! The table is a process-wide constant: it is built at compile time and
//! read concurrently by every job without synchronization.

use super::HashAlgorithm;
use super::algorithms::{Md5Algorithm, Sha256Algorithm};
use super::traits::HashAlgorithmImpl;
use crate::{Result, error::ValidationError};

static ALGORITHMS: [&dyn HashAlgorithmImpl; 2] = [&Md5Algorithm, &Sha256Algorithm];

/// Lookup over the built-in algorithm descriptors
pub struct AlgorithmRegistry;

impl AlgorithmRegistry {
    /// Descriptor for a known algorithm
    pub fn get(algorithm: HashAlgorithm) -> &'static dyn HashAlgorithmImpl {
        match algorithm {
            HashAlgorithm::MD5 => ALGORITHMS[0],
            HashAlgorithm::SHA256 => ALGORITHMS[1],
        }
    }

    /// Resolve a user-supplied name, ignoring ASCII case
    pub fn find(name: &str) -> Result<&'static dyn HashAlgorithmImpl> {
        ALGORITHMS
            .iter()
            .copied()
            .find(|descriptor| descriptor.id().eq_ignore_ascii_case(name))
            .ok_or_else(|| ValidationError::unknown_algorithm(name).into())
    }

    /// All registered descriptors in registration order
    pub fn all() -> &'static [&'static dyn HashAlgorithmImpl] {
        &ALGORITHMS
    }

    /// Identifiers of all registered algorithms
    pub fn list() -> Vec<&'static str> {
        ALGORITHMS.iter().map(|descriptor| descriptor.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    // `Result::unwrap_err` requires the Ok type to be `Debug`.
    impl std::fmt::Debug for dyn HashAlgorithmImpl {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.id())
        }
    }

    #[test]
    fn test_get_matches_algorithm_tag() {
        for algorithm in HashAlgorithm::all() {
            assert_eq!(AlgorithmRegistry::get(*algorithm).algorithm(), *algorithm);
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(
            AlgorithmRegistry::find("MD5").unwrap().algorithm(),
            HashAlgorithm::MD5
        );
        assert_eq!(
            AlgorithmRegistry::find("Sha256").unwrap().algorithm(),
            HashAlgorithm::SHA256
        );
    }

    #[test]
    fn test_find_unknown_name() {
        let error = AlgorithmRegistry::find("sha1").unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(ValidationError::UnknownAlgorithm { ref name }) if name == "sha1"
        ));
    }

    #[test]
    fn test_list() {
        assert_eq!(AlgorithmRegistry::list(), vec!["md5", "sha256"]);
        assert_eq!(AlgorithmRegistry::all().len(), 2);
    }
}
