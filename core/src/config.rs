//! Application configuration.
//!
//! Loaded from YAML at `$ARSENAL_CONFIG` or
//! `~/.config/arsenal/config.yaml`. Every field has a default so a
//! partial (or absent) file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shell binary used for `sh -c` invocation.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Drain cadence for the console view, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Grace period between SIGTERM and SIGKILL on stop, in milliseconds.
    #[serde(default = "default_stop_grace_ms")]
    pub stop_grace_ms: u64,
    /// Theme name ("dark" or "light").
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Default path for saving console output.
    #[serde(default = "default_save_path")]
    pub default_save_path: String,
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_tick_ms() -> u64 {
    50
}

fn default_stop_grace_ms() -> u64 {
    5000
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_save_path() -> String {
    "arsenal_output.txt".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            shell: default_shell(),
            tick_ms: default_tick_ms(),
            stop_grace_ms: default_stop_grace_ms(),
            theme: default_theme(),
            default_save_path: default_save_path(),
        }
    }
}

impl AppConfig {
    /// Load from a specific YAML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        serde_yaml::from_str(&text)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Load from `$ARSENAL_CONFIG` or the default location, falling back
    /// to defaults when no file exists. A file that exists but fails to
    /// parse is an error; silently ignoring it would mask typos.
    pub fn load_default() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// The config file location this build will look at.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("ARSENAL_CONFIG") {
            return PathBuf::from(path);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home)
            .join(".config")
            .join("arsenal")
            .join("config.yaml")
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
