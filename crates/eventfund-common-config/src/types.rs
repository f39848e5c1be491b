//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventfundConfig {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Access guard configuration.
    pub guard: GuardConfig,
    /// Session storage configuration.
    pub storage: StorageConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the platform API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Use the built-in mock API instead of the network.
    pub mock: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
            mock: false,
        }
    }
}

/// Access guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where denied requests are sent.
    pub login_path: String,
    /// Confirm stored tokens against the backend before allowing.
    pub verify_token: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            verify_token: true,
        }
    }
}

/// Session storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File holding the persisted session. Relative paths are resolved
    /// against the project directory.
    pub session_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_file: PathBuf::from(".eventfund/session.json"),
        }
    }
}
