use anyhow::{bail, Context};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "~/.config/rr-scorers/config.yaml";
const DEFAULT_SCORERS_PATH: &str = "~/.config/rr-scorers/scorers.json";

/// Default per-call scoring deadline
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default worker pool size
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Executor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Deadline for one scorer invocation, queueing included
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum scorer invocations running at once
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl ExecutorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scorer pipeline file (json or yaml)
    #[serde(default = "default_scorers_path")]
    pub scorers_path: PathBuf,

    /// Executor configuration
    #[serde(default)]
    pub executor: ExecutorConfig,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_scorers_path() -> PathBuf {
    expand_path(DEFAULT_SCORERS_PATH)
}

impl Config {
    /// Load configuration from default path or create default
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::load_from(expand_path(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from `path`, falling back to defaults if it is absent
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let config_path = path.as_ref();

        if config_path.exists() {
            info!("Loading configuration from: {:?}", config_path);
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            // serde's #[serde(default)] handles all defaults during deserialization
            let mut config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

            config.scorers_path = expand_path(&config.scorers_path.to_string_lossy());
            config.validate()?;

            Ok(config)
        } else {
            info!("Configuration not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), anyhow::Error> {
        let config_path = path.as_ref();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(config_path, content)?;

        info!("Configuration saved to: {:?}", config_path);
        Ok(())
    }

    /// Reject settings the executor cannot run with
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.executor.max_workers == 0 {
            bail!("executor.max_workers must be at least 1");
        }
        if self.executor.timeout_ms == 0 {
            bail!("executor.timeout_ms must be greater than 0");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scorers_path: default_scorers_path(),
            executor: ExecutorConfig::default(),
        }
    }
}

/// Expand a leading `~` in a configured path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
