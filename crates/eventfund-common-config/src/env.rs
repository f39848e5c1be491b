//! Environment variables and `.env` files.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        var: String,
        value: String,
        expected: &'static str,
    },
}

/// Environment variable names.
pub mod vars {
    pub const EVENTFUND_CONFIG: &str = "EVENTFUND_CONFIG";
    /// Selects an extra `.env.<name>` file.
    pub const EVENTFUND_ENV: &str = "EVENTFUND_ENV";

    pub const EVENTFUND_API_URL: &str = "EVENTFUND_API_URL";
    pub const EVENTFUND_API_MOCK: &str = "EVENTFUND_API_MOCK";
    pub const EVENTFUND_API_TIMEOUT: &str = "EVENTFUND_API_TIMEOUT";

    pub const EVENTFUND_VERIFY_TOKEN: &str = "EVENTFUND_VERIFY_TOKEN";

    pub const EVENTFUND_LOG_LEVEL: &str = "EVENTFUND_LOG_LEVEL";
}

/// The `.env` files applied to this process.
#[derive(Debug, Default)]
pub struct Environment {
    loaded: Vec<PathBuf>,
}

impl Environment {
    /// Load `.env` files from the current directory.
    pub fn init() -> Self {
        Self::init_in(Path::new("."))
    }

    /// Load `.env.<EVENTFUND_ENV>`, `.env.local` and `.env` from `dir`.
    ///
    /// Variables already set are never overwritten, so the process
    /// environment wins over every file and earlier files win over later ones.
    pub fn init_in(dir: &Path) -> Self {
        let mut candidates = Vec::with_capacity(3);
        if let Some(profile) = Self::get(vars::EVENTFUND_ENV) {
            candidates.push(dir.join(format!(".env.{profile}")));
        }
        candidates.push(dir.join(".env.local"));
        candidates.push(dir.join(".env"));

        let loaded = candidates
            .into_iter()
            .filter(|path| dotenvy::from_path(path).is_ok())
            .collect();
        Self { loaded }
    }

    pub fn loaded(&self) -> &[PathBuf] {
        &self.loaded
    }

    /// Read a variable. Empty values count as unset.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.trim().is_empty())
    }

    /// Read a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`).
    pub fn flag(var: &str) -> Result<Option<bool>, EnvError> {
        let Some(value) = Self::get(var) else {
            return Ok(None);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(EnvError::InvalidValue {
                var: var.to_string(),
                value,
                expected: "a boolean",
            }),
        }
    }

    /// Parse a variable with [`FromStr`].
    pub fn parse<T: FromStr>(var: &str, expected: &'static str) -> Result<Option<T>, EnvError> {
        match Self::get(var) {
            Some(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| EnvError::InvalidValue {
                    var: var.to_string(),
                    value,
                    expected,
                }),
            None => Ok(None),
        }
    }
}
