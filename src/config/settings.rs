use crate::domain::model::Credentials;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FabricError, Result};
use crate::utils::validation::{require_non_empty, validate_non_empty_string, Validate};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_FILE: &str = "fabric-search.toml";
pub const DEFAULT_INVENTORY_PATH: &str = "inventory.yml";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const ENV_USERNAME: &str = "INVENTORY_USERNAME";
pub const ENV_PASSWORD: &str = "INVENTORY_PASSWORD";
pub const ENV_INVENTORY_PATH: &str = "INVENTORY_PATH";

/// Optional on-disk settings. Every key present here wins over the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    pub username: Option<String>,
    pub password: Option<String>,
    pub inventory_path: Option<PathBuf>,
    pub verify_tls: Option<bool>,
    pub request_timeout_seconds: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl SettingsFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FabricError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR}` with the environment value. Unknown variables are left as written.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FabricError::ConfigError {
        message: e.to_string(),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

/// Effective configuration, built once at startup.
#[derive(Clone)]
pub struct Settings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub inventory_path: PathBuf,
    pub verify_tls: bool,
    pub request_timeout_seconds: Option<u64>,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Reads the environment and, if it exists, the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Some(SettingsFile::from_toml_str(&content)?)
        } else {
            None
        };
        Ok(Self::merge(file, |key| std::env::var(key).ok()))
    }

    pub fn merge<F>(file: Option<SettingsFile>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        Self {
            username: file.username.or_else(|| env(ENV_USERNAME)),
            password: file.password.or_else(|| env(ENV_PASSWORD)),
            inventory_path: file
                .inventory_path
                .or_else(|| env(ENV_INVENTORY_PATH).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_PATH)),
            verify_tls: file.verify_tls.unwrap_or(false),
            request_timeout_seconds: file.request_timeout_seconds,
            log_dir: file
                .log_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }

    pub fn with_inventory_override(mut self, inventory: Option<PathBuf>) -> Self {
        if let Some(path) = inventory {
            self.inventory_path = path;
        }
        self
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let username = require_non_empty(ENV_USERNAME, &self.username)?;
        let password = require_non_empty(ENV_PASSWORD, &self.password)?;
        Ok(Credentials::new(username, password))
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.credentials()?;
        validate_non_empty_string("inventory_path", &self.inventory_path.to_string_lossy())?;
        if self.request_timeout_seconds == Some(0) {
            return Err(FabricError::InvalidConfigValueError {
                field: "request_timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn inventory_path(&self) -> &Path {
        &self.inventory_path
    }

    fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.request_timeout_seconds
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("inventory_path", &self.inventory_path)
            .field("verify_tls", &self.verify_tls)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}
