//! # Configuration
//!
//! Stored as `config.json` next to the data files. Missing keys fall back to
//! compiled defaults, so an absent file is the same as an empty one.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `model` | `gemini-1.5-flash` | Model used for summaries and interview prep |
//! | `api-key-env` | `GEMINI_API_KEY` | Environment variable holding the API key |
//! | `api-base` | Gemini v1beta URL | Base URL of the generation API |
//! | `timeout-secs` | `60` | Per-request timeout |
//!
//! The API key itself is never written to disk.

use crate::error::{JobtrackError, Result};
use crate::prep::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const KEYS: [&str; 4] = ["model", "api-key-env", "api-base", "timeout-secs"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct JobtrackConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for JobtrackConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl JobtrackConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JobtrackError::Io)?;
        let config: JobtrackConfig =
            serde_json::from_str(&content).map_err(JobtrackError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JobtrackError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JobtrackError::Serialization)?;
        fs::write(config_path, content).map_err(JobtrackError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "model" => Some(self.model.clone()),
            "api-key-env" => Some(self.api_key_env.clone()),
            "api-base" => Some(self.api_base.clone()),
            "timeout-secs" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("Value for {} cannot be empty", key));
        }
        match key {
            "model" => self.model = value.to_string(),
            "api-key-env" => self.api_key_env = value.to_string(),
            "api-base" => self.api_base = value.to_string(),
            "timeout-secs" => {
                self.timeout_secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| format!("timeout-secs must be a positive integer, got {}", value))?;
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    /// The API key from the configured environment variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = JobtrackConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = JobtrackConfig::load(temp.path()).unwrap();
        assert_eq!(config, JobtrackConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = JobtrackConfig::default();
        config.set("model", "gemini-2.0-flash").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = JobtrackConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"timeout-secs": 5}"#).unwrap();

        let config = JobtrackConfig::load(temp.path()).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_get_and_set_keys() {
        let mut config = JobtrackConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
        assert_eq!(config.get("nope"), None);

        config.set("timeout-secs", "15").unwrap();
        assert_eq!(config.get("timeout-secs").as_deref(), Some("15"));

        assert!(config.set("timeout-secs", "0").is_err());
        assert!(config.set("timeout-secs", "soon").is_err());
        assert!(config.set("model", "  ").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_api_key_reads_named_variable() {
        let config = JobtrackConfig {
            api_key_env: "JOBTRACK_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
