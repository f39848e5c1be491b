//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Mock backend, verified tokens, session next to the config.
pub const MOCK_CONFIG: &str = r#"
api:
  mock: true
guard:
  login_path: /login
  verify_token: true
storage:
  session_file: session.json
"#;

/// Test context with a temporary project directory.
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join(".eventfund");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        let config_path = config_dir.join("config.yaml");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Write a config file.
    pub fn with_config(self, config: &str) -> Self {
        std::fs::write(&self.config_path, config).expect("Failed to write config");
        self
    }

    /// Config using the in-process mock backend.
    pub fn with_mock_backend(self) -> Self {
        self.with_config(MOCK_CONFIG)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Where the CLI keeps the session for [`MOCK_CONFIG`].
    pub fn session_path(&self) -> PathBuf {
        self.path().join(".eventfund").join("session.json")
    }

    /// Write a raw session file.
    pub fn with_session(self, token: &str, role: &str) -> Self {
        let body = serde_json::json!({ "auth_token": token, "user_role": role });
        std::fs::write(self.session_path(), body.to_string()).expect("Failed to write session");
        self
    }

    /// A command configured for this context.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("eventfund").expect("Binary not found");
        cmd.current_dir(self.path())
            .env("EVENTFUND_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("EVENTFUND_LOG_LEVEL")
            .env_remove("EVENTFUND_API_URL")
            .env_remove("EVENTFUND_API_MOCK")
            .env_remove("EVENTFUND_VERIFY_TOKEN")
            .env_remove("EVENTFUND_PASSWORD");
        cmd
    }

    /// Log in as one of the seeded mock users.
    pub fn login_as(&self, role: &str) {
        self.command()
            .args(["login", "--email"])
            .arg(format!("{role}@eventfund.io"))
            .arg("--password")
            .arg(format!("{role}123"))
            .assert()
            .success();
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
