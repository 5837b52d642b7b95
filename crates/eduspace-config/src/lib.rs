//! Configuration for the EduSpace console.
//!
//! A TOML file in the platform config directory, layered over built-in
//! defaults and under `EDUSPACE_`-prefixed environment variables, then
//! validated and translated into `eduspace_core::ConsoleConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eduspace_core::{ConsoleConfig, LatencyConfig};

/// Upper bound for any single simulated delay.
const MAX_LATENCY_MS: u64 = 60_000;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub latency: LatencySection,

    #[serde(default)]
    pub notifications: NotificationSection,

    #[serde(default)]
    pub ui: UiSection,

    /// Start with the demo records and admin account.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency: LatencySection::default(),
            notifications: NotificationSection::default(),
            ui: UiSection::default(),
            seed_demo_data: true,
        }
    }
}

/// Simulated backend delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatencySection {
    #[serde(default = "default_read_ms")]
    pub read_ms: u64,

    #[serde(default = "default_write_ms")]
    pub write_ms: u64,

    #[serde(default = "default_auth_ms")]
    pub auth_ms: u64,
}

impl Default for LatencySection {
    fn default() -> Self {
        Self {
            read_ms: default_read_ms(),
            write_ms: default_write_ms(),
            auth_ms: default_auth_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationSection {
    /// How long each toast stays on screen.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSection {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default = "default_render_ms")]
    pub render_ms: u64,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            render_ms: default_render_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_read_ms() -> u64 {
    500
}
fn default_write_ms() -> u64 {
    500
}
fn default_auth_ms() -> u64 {
    800
}
fn default_ttl_secs() -> u64 {
    5
}
fn default_tick_ms() -> u64 {
    250
}
fn default_render_ms() -> u64 {
    33
}

// ── Validation and translation ──────────────────────────────────────

impl Config {
    /// Check ranges and build the core runtime config.
    pub fn to_console_config(&self) -> Result<ConsoleConfig, ConfigError> {
        self.validate()?;
        Ok(ConsoleConfig {
            latency: LatencyConfig {
                read: Duration::from_millis(self.latency.read_ms),
                write: Duration::from_millis(self.latency.write_ms),
                auth: Duration::from_millis(self.latency.auth_ms),
            },
            notification_ttl: Duration::from_secs(self.notifications.ttl_secs),
            seed_demo_data: self.seed_demo_data,
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms)
    }

    pub fn render_rate(&self) -> Duration {
        Duration::from_millis(self.ui.render_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let latencies = [
            ("latency.read_ms", self.latency.read_ms),
            ("latency.write_ms", self.latency.write_ms),
            ("latency.auth_ms", self.latency.auth_ms),
        ];
        for (field, value) in latencies {
            if value > MAX_LATENCY_MS {
                return Err(invalid(field, format!("{value} exceeds {MAX_LATENCY_MS}")));
            }
        }
        let positives = [
            ("notifications.ttl_secs", self.notifications.ttl_secs),
            ("ui.tick_ms", self.ui.tick_ms),
            ("ui.render_ms", self.ui.render_ms),
        ];
        for (field, value) in positives {
            if value == 0 {
                return Err(invalid(field, "must be greater than zero".into()));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason,
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("edu", "eduspace", "eduspace").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("eduspace");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields the defaults.
///
/// Nested keys use a double underscore: `EDUSPACE_LATENCY__READ_MS=0`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("EDUSPACE_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_translate_to_core_defaults() {
        let console = Config::default().to_console_config();
        assert!(matches!(console, Ok(c) if c == ConsoleConfig::default()));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let mut cfg = Config::default();
        cfg.ui.tick_ms = 0;
        let err = cfg.validate();
        assert!(matches!(err, Err(ConfigError::Validation { field, .. }) if field == "ui.tick_ms"));
    }

    #[test]
    fn huge_latency_is_rejected() {
        let mut cfg = Config::default();
        cfg.latency.write_ms = MAX_LATENCY_MS + 1;
        assert!(cfg.to_console_config().is_err());
    }

    #[test]
    fn zero_latency_is_allowed() {
        let mut cfg = Config::default();
        cfg.latency = LatencySection {
            read_ms: 0,
            write_ms: 0,
            auth_ms: 0,
        };
        assert!(matches!(
            cfg.to_console_config(),
            Ok(c) if c.latency == LatencyConfig::none()
        ));
    }
}
