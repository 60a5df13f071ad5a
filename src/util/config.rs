// src/util/config.rs
//! Application configuration: defaults, then `copilot.yaml`, then environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use reqwest::Url;

use crate::error::{CopilotError, Result};

pub const CONFIG_FILE: &str = "copilot.yaml";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const ENV_API_URL: &str = "COPILOT_API_URL";
pub const ENV_DATA_DIR: &str = "COPILOT_DATA_DIR";
pub const ENV_LOG_DIR: &str = "COPILOT_LOG_DIR";
pub const ENV_REQUIRE_LOGIN: &str = "COPILOT_REQUIRE_LOGIN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the document Q&A service
    pub api_base_url: String,
    /// Where the session file lives
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Show the sign-in screen before the main views
    pub require_login: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from("./data"),
            log_dir: PathBuf::from("./logs"),
            require_login: true,
        }
    }
}

impl AppConfig {
    /// Loads `.env`, the optional config file in the working directory and
    /// the process environment, in that order of increasing priority.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::from_file_if_exists(Path::new(CONFIG_FILE))?;
        let env: HashMap<String, String> = std::env::vars().collect();
        config.apply_overrides(&env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file_if_exists(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(url) = vars.get(ENV_API_URL) {
            self.api_base_url = url.clone();
        }
        if let Some(dir) = vars.get(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = vars.get(ENV_LOG_DIR) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(flag) = vars.get(ENV_REQUIRE_LOGIN) {
            self.require_login = parse_bool(flag).ok_or_else(|| {
                CopilotError::ConfigError(format!(
                    "{} must be true or false, got '{}'",
                    ENV_REQUIRE_LOGIN, flag
                ))
            })?;
        }
        Ok(())
    }

    /// Checks the base URL and strips trailing slashes so endpoint paths can
    /// be appended directly.
    pub fn validate(&mut self) -> Result<()> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/').to_string();
        let url = Url::parse(&trimmed).map_err(|e| {
            CopilotError::ConfigError(format!("invalid api_base_url '{}': {}", self.api_base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CopilotError::ConfigError(format!(
                "api_base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        self.api_base_url = trimmed;
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
