//! Configuration loading and generation.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorCode, HarvestError};

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable debug logging to file
    pub debug: bool,

    /// Path to log directory
    pub log_path: PathBuf,

    /// Version-control client used for cloning
    pub git_command: String,

    /// Clone with `--depth 1`
    pub shallow_clone: bool,

    /// Metrics tool executable
    pub analyzer_command: String,

    /// Arguments passed to the metrics tool, run inside the analysis root
    pub analyzer_args: Vec<String>,

    /// Manifest that marks the analysis root
    pub manifest_file: String,

    /// Analyzer configuration file written next to the manifest
    pub options_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            log_path: default_log_path(),
            git_command: "git".to_string(),
            shallow_clone: true,
            analyzer_command: "dcm".to_string(),
            analyzer_args: default_analyzer_args(),
            manifest_file: "pubspec.yaml".to_string(),
            options_file: "analysis_options.yaml".to_string(),
        }
    }
}

fn default_analyzer_args() -> Vec<String> {
    ["calculate-metrics", ".", "-c", "--report-all"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Default log path: ~/.config/dcm-harvest/logs
fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dcm-harvest")
        .join("logs")
}

/// Configuration service.
pub struct ConfigService;

impl ConfigService {
    /// Get the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dcm-harvest")
            .join("config.toml")
    }

    /// Load configuration from file.
    ///
    /// If `path` is `None`, uses the default path.
    /// If the file doesn't exist, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);
        let config_dir = path.parent();

        if !path.exists() {
            let mut config = Config::default();
            if let Some(dir) = config_dir {
                config.log_path = dir.join("logs");
            }
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content).map_err(|e| {
            HarvestError::new(
                ErrorCode::InvalidRequest,
                format!("Failed to parse config file {}: {e}", path.display()),
            )
        })?;

        // If log_path was not explicitly set, use config file's directory/logs
        if config.log_path == default_log_path()
            && let Some(dir) = config_dir
        {
            config.log_path = dir.join("logs");
        }

        Ok(config)
    }

    /// Generate default configuration file at the default path.
    pub fn generate_default() -> Result<()> {
        Self::generate_at(&Self::default_path())
    }

    /// Generate default configuration file at the specified path.
    pub fn generate_at(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = Self::default_config_content();
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn default_config_content() -> String {
        r#"# dcm-harvest configuration file

# Enable debug logging to file (default: false)
debug = false

# Path to log directory (default: ~/.config/dcm-harvest/logs)
# log_path = "~/.config/dcm-harvest/logs"

# Version-control client and clone mode
git_command = "git"
shallow_clone = true

# Metrics tool and its arguments (run inside the directory holding the manifest)
analyzer_command = "dcm"
analyzer_args = ["calculate-metrics", ".", "-c", "--report-all"]

# Manifest marking the analysis root, and the analyzer options file written next to it
manifest_file = "pubspec.yaml"
options_file = "analysis_options.yaml"
"#
        .to_string()
    }
}
