use crate::output::OutputFormat;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use myhash_core::HashConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub hash: HashConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Values given on the command line, which beat every other layer
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub chunk_size: Option<usize>,
    pub jobs: Option<usize>,
    pub ordered: bool,
    pub format: Option<OutputFormat>,
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(size) = overrides.chunk_size {
            self.hash.chunk_size = size;
        }
        if let Some(jobs) = overrides.jobs {
            self.hash.max_concurrent_jobs = Some(jobs);
        }
        if overrides.ordered {
            self.hash.ordered_output = true;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return PathBuf::from(xdg_config).join("myhash/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/myhash/config.toml")
        }

        #[cfg(not(target_os = "linux"))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("myhash")
                .join("config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        self.figment()
            .merge(Env::prefixed("MYHASH_").split("__"))
            .extract()
            .context("Failed to load configuration")
    }

    /// Defaults plus the config file, without the environment layer
    fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            log::debug!("Reading configuration from {}", self.config_path.display());
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_file(manager: &ConfigManager) -> AppConfig {
        manager.figment().extract().unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("missing.toml"));

        let config = load_file(&manager);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.hash.chunk_size, 4096);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[hash]\nchunk_size = 65536\nmax_concurrent_jobs = 3\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = load_file(&ConfigManager::with_path(path));
        assert_eq!(config.hash.chunk_size, 65536);
        assert_eq!(config.hash.max_concurrent_jobs, Some(3));
        assert!(!config.hash.ordered_output);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_serialized_config_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut expected = AppConfig::default();
        expected.hash.ordered_output = true;
        expected.hash.memory_limit = 8 * 1024 * 1024;
        std::fs::write(&path, toml::to_string(&expected).unwrap()).unwrap();

        assert_eq!(load_file(&ConfigManager::with_path(path)), expected);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[hash]\nchunk_size = \"big\"\n").unwrap();

        let error = ConfigManager::with_path(path).load().unwrap_err();
        assert!(error.to_string().contains("Failed to load configuration"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            chunk_size: Some(100),
            jobs: Some(2),
            ordered: true,
            format: Some(OutputFormat::Json),
        });

        assert_eq!(config.hash.chunk_size, 100);
        assert_eq!(config.hash.max_concurrent_jobs, Some(2));
        assert!(config.hash.ordered_output);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_overrides_keep_loaded_values() {
        let mut config = AppConfig::default();
        config.hash.ordered_output = true;
        config.output.format = OutputFormat::Json;

        config.apply_cli_overrides(&CliOverrides::default());
        assert!(config.hash.ordered_output);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_with_path() {
        let manager = ConfigManager::with_path(PathBuf::from("/tmp/x/config.toml"));
        assert_eq!(manager.config_path(), std::path::Path::new("/tmp/x/config.toml"));
    }
}
