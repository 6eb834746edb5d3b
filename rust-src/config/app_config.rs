//! TOML configuration with environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TimerMode;

use super::settings::{
    get_config_path, get_default_data_path, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_URL,
    MAX_MODE_MINUTES,
};


/// Resolved configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}


/// Backend session API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}


/// Configured minutes per timer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_pomodoro_minutes")]
    pub pomodoro_minutes: u32,

    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,

    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
}

fn default_pomodoro_minutes() -> u32 {
    TimerMode::Focus.default_minutes()
}

fn default_short_break_minutes() -> u32 {
    TimerMode::ShortBreak.default_minutes()
}

fn default_long_break_minutes() -> u32 {
    TimerMode::LongBreak.default_minutes()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            pomodoro_minutes: default_pomodoro_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
        }
    }
}

impl TimerConfig {
    /// Configured minutes for `mode`, capped at [`MAX_MODE_MINUTES`]; zero falls back to the mode default.
    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        let minutes = match mode {
            TimerMode::Focus => self.pomodoro_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        };
        if minutes == 0 { mode.default_minutes() } else { minutes.min(MAX_MODE_MINUTES) }
    }

    pub fn set_minutes(&mut self, mode: TimerMode, minutes: u32) {
        let slot = match mode {
            TimerMode::Focus => &mut self.pomodoro_minutes,
            TimerMode::ShortBreak => &mut self.short_break_minutes,
            TimerMode::LongBreak => &mut self.long_break_minutes,
        };
        *slot = minutes.min(MAX_MODE_MINUTES);
    }
}


/// Where dashboard data is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

fn default_data_path() -> PathBuf {
    get_default_data_path()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}


/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {error}", path.display())]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config {}: {error}", path.display())]
    Parse { path: PathBuf, error: String },
}


impl AppConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load the default config file when present, then apply environment overrides.
    pub fn load_default() -> Self {
        let path = get_config_path();

        let mut config = if path.exists() {
            match Self::load(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Falling back to default config");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config
    }

    /// Apply `SOLOFOCUS_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SOLOFOCUS_SERVER_URL") {
            self.server.url = url;
        }
        if let Ok(path) = std::env::var("SOLOFOCUS_DATA") {
            self.dashboard.data_path = PathBuf::from(path);
        }
    }

    /// Render as TOML for display.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.url, "http://localhost:8080");
        assert_eq!(config.timer.minutes_for(TimerMode::Focus), 25);
        assert_eq!(config.timer.minutes_for(TimerMode::ShortBreak), 5);
        assert_eq!(config.timer.minutes_for(TimerMode::LongBreak), 15);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timer]\npomodoro_minutes = 50\n\n[server]\nurl = \"http://focus.local\"").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.timer.pomodoro_minutes, 50);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert_eq!(config.server.url, "http://focus.local");
        assert_eq!(config.server.request_timeout_secs, 10);
    }

    #[test]
    fn test_invalid_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timer\nbroken").unwrap();
        assert!(matches!(AppConfig::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_zero_minutes_fall_back() {
        let mut timer = TimerConfig::default();
        timer.set_minutes(TimerMode::LongBreak, 0);
        assert_eq!(timer.minutes_for(TimerMode::LongBreak), 15);
        timer.set_minutes(TimerMode::LongBreak, 20);
        assert_eq!(timer.minutes_for(TimerMode::LongBreak), 20);
    }

    #[test]
    fn test_oversized_minutes_are_capped() {
        let config: AppConfig = toml::from_str("[timer]\npomodoro_minutes = 100000000").unwrap();
        assert_eq!(config.timer.minutes_for(TimerMode::Focus), MAX_MODE_MINUTES);

        let mut timer = TimerConfig::default();
        timer.set_minutes(TimerMode::ShortBreak, u32::MAX);
        assert_eq!(timer.short_break_minutes, MAX_MODE_MINUTES);
    }
}
