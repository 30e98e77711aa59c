use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const API_URL_ENV: &str = "MODELCTL_API_URL";
pub const TOKEN_ENV: &str = "MODELCTL_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Current plan and branch
    #[serde(default)]
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API server
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,

    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_url() -> String {
    "http://localhost:8099".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            plan_id: None,
            branch: default_branch(),
        }
    }
}

/// Keys accepted by `get` and `set`.
pub const KEYS: &[&str] = &[
    "api.url",
    "api.timeout_secs",
    "auth.token",
    "auth.org_id",
    "project.plan_id",
    "project.branch",
];

impl Config {
    /// Get the base directory: <config_dir>/modelctl/
    pub fn base_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join("modelctl"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the config file path: <config_dir>/modelctl/config.toml
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Load config from the default location and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(write_err)
    }

    /// Override file values with non-empty environment values.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api.url = url;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.auth.token = Some(token);
        }
    }

    /// The auth token, or an error telling the user how to sign in.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.auth
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::NotAuthenticated)
    }

    /// The current plan id, if one is set.
    pub fn current_plan(&self) -> Option<&str> {
        self.project.plan_id.as_deref().filter(|p| !p.is_empty())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "api.url" => self.api.url.clone(),
            "api.timeout_secs" => self.api.timeout_secs.to_string(),
            "auth.token" => self
                .auth
                .token
                .as_ref()
                .map(|_| "***".to_string())
                .unwrap_or_default(),
            "auth.org_id" => self.auth.org_id.clone().unwrap_or_default(),
            "project.plan_id" => self.project.plan_id.clone().unwrap_or_default(),
            "project.branch" => self.project.branch.clone(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Set a key. Empty values clear optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let optional = |v: &str| {
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        };

        match key {
            "api.url" => self.api.url = value.to_string(),
            "api.timeout_secs" => {
                self.api.timeout_secs =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?
            }
            "auth.token" => self.auth.token = optional(value),
            "auth.org_id" => self.auth.org_id = optional(value),
            "project.plan_id" => self.project.plan_id = optional(value),
            "project.branch" => {
                self.project.branch = if value.is_empty() {
                    default_branch()
                } else {
                    value.to_string()
                }
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
