use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::Deserialize;
use std::path::PathBuf;

use crate::auth::DEFAULT_MAX_ATTEMPTS;
use crate::user::{EXTENSION, profile_path};

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "PASSKEEP_HOME";
/// Directory under the home directory used when no override is set.
pub const DEFAULT_DIR_NAME: &str = "password-manager";
pub const CONFIG_FILE: &str = "config.json";
pub const APPROVED_USERS_STEM: &str = "approvedUsers";
pub const HISTORY_FILE: &str = "history";
pub const LOG_FILE: &str = "password-manager.log";

/// Settings read from `config.json`. Every field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub max_attempts: i64,
    pub history_size: usize,
    pub log_level: String,
    pub greeting: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            history_size: 1000,
            log_level: "info".to_string(),
            greeting: None,
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_dir: PathBuf,
    pub max_attempts: i64,
    pub history_size: usize,
    pub log_level: LevelFilter,
    pub greeting: Option<String>,
}

impl AppConfig {
    /// Resolves the base directory and reads `config.json` from it if present.
    pub fn load() -> Result<Self> {
        Self::from_dir(base_dir()?)
    }

    /// Builds the configuration for an explicit base directory.
    pub fn from_dir(base_dir: PathBuf) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        let file: FileConfig = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
        } else {
            FileConfig::default()
        };
        Self::from_file_config(base_dir, file)
    }

    fn from_file_config(base_dir: PathBuf, file: FileConfig) -> Result<Self> {
        let log_level = file
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level '{}'", file.log_level))?;
        Ok(Self {
            base_dir,
            max_attempts: file.max_attempts,
            history_size: file.history_size,
            log_level,
            greeting: file.greeting,
        })
    }

    pub fn approved_users_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", APPROVED_USERS_STEM, EXTENSION))
    }

    pub fn profile_path(&self, username: &str) -> PathBuf {
        profile_path(&self.base_dir, username)
    }

    pub fn history_path(&self) -> PathBuf {
        self.base_dir.join(HISTORY_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir.join(LOG_FILE)
    }
}

/// `$PASSKEEP_HOME`, or `~/password-manager`.
pub fn base_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs_next::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}
