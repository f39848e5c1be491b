//! Configuration file loading and parsing.

use crate::env::{vars, EnvError, Environment};
use crate::types::EventfundConfig;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Directory holding project-local configuration and state.
pub const CONFIG_DIR: &str = ".eventfund";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error(transparent)]
    Env(#[from] EnvError),
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Project directory this loader resolves paths against.
    pub fn project_dir(&self) -> &Path {
        &self.base_path
    }

    /// Default config file location for this project.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from `.eventfund/config.yaml`.
    ///
    /// A missing file yields the defaults.
    pub fn load(&self) -> Result<EventfundConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            let mut config = EventfundConfig::default();
            self.apply_env_overrides(&mut config)?;
            self.validate(&config)?;
            return Ok(config);
        }

        self.load_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_file(&self, path: &Path) -> Result<EventfundConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let mut config: EventfundConfig = if expanded.trim().is_empty() {
            EventfundConfig::default()
        } else {
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Resolve the session file against the project directory.
    pub fn session_path(&self, config: &EventfundConfig) -> PathBuf {
        let path = &config.storage.session_file;
        if path.is_absolute() {
            path.clone()
        } else {
            self.base_path.join(path)
        }
    }

    /// Expand `${VAR}` and `${VAR:-default}` references.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is a valid regex")
        });

        let mut missing: Option<String> = None;
        let expanded = pattern.replace_all(content, |cap: &Captures<'_>| {
            match (std::env::var(&cap[1]), cap.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(default)) => default.as_str().to_string(),
                (Err(_), None) => {
                    missing.get_or_insert_with(|| cap[1].to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(var) => Err(ConfigError::EnvVarNotFound { var }),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Apply `EVENTFUND_API_*` and `EVENTFUND_VERIFY_TOKEN` overrides.
    fn apply_env_overrides(&self, config: &mut EventfundConfig) -> Result<(), ConfigError> {
        if let Some(url) = Environment::get(vars::EVENTFUND_API_URL) {
            config.api.base_url = url;
        }
        if let Some(mock) = Environment::flag(vars::EVENTFUND_API_MOCK)? {
            config.api.mock = mock;
        }
        if let Some(secs) = Environment::parse(vars::EVENTFUND_API_TIMEOUT, "a number of seconds")? {
            config.api.timeout_secs = secs;
        }
        if let Some(verify) = Environment::flag(vars::EVENTFUND_VERIFY_TOKEN)? {
            config.guard.verify_token = verify;
        }
        Ok(())
    }

    /// Validate configuration values.
    fn validate(&self, config: &EventfundConfig) -> Result<(), ConfigError> {
        if !config.guard.login_path.starts_with('/') {
            return Err(ConfigError::ValidationError {
                message: "guard.login_path must be an absolute route starting with '/'".to_string(),
            });
        }

        if config.api.timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "api.timeout_secs must be greater than 0".to_string(),
            });
        }

        if !config.api.mock {
            url::Url::parse(&config.api.base_url).map_err(|e| ConfigError::ValidationError {
                message: format!("api.base_url is not a valid URL: {e}"),
            })?;
        }

        if config.storage.session_file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "storage.session_file must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, config: &EventfundConfig) -> Result<(), ConfigError> {
        let config_dir = self.base_path.join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir)?;

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(self.config_path(), yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
