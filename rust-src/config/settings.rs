//! Application settings and path constants.

use std::path::PathBuf;
use std::time::Duration;


/// Days back from today covered by the heatmap (52 weeks).
pub const HEATMAP_WINDOW_DAYS: i64 = 364;

/// Graph dimensions.
pub const GRAPH_WEEKS: usize = 52;
pub const GRAPH_DAYS_PER_WEEK: usize = 7;

/// Countdown tick period.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long a status message stays visible.
pub const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Delay before switching to the dashboard after a completed focus session.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Upper bound for a configured mode duration (the settings field takes 3 digits).
pub const MAX_MODE_MINUTES: u32 = 999;

/// Radius of the progress ring, in ring units.
pub const RING_RADIUS: f64 = 45.0;

/// Default backend location.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Default HTTP request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;


/// Get the SoloFocus application directory.
pub fn get_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".solofocus")
}


/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_app_dir().join("config.toml")
}


/// Get the default dashboard data path.
pub fn get_default_data_path() -> PathBuf {
    get_app_dir().join("dashboard.json")
}


/// Get the log file used by interactive commands.
pub fn get_log_path() -> PathBuf {
    get_app_dir().join("solofocus.log")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(HEATMAP_WINDOW_DAYS, 364);
        assert_eq!(GRAPH_WEEKS * GRAPH_DAYS_PER_WEEK, 364);
        assert_eq!(TICK_INTERVAL, Duration::from_secs(1));
        assert_eq!(REDIRECT_DELAY, Duration::from_secs(3));
    }

    #[test]
    fn test_paths_live_under_app_dir() {
        let app_dir = get_app_dir();
        assert!(app_dir.to_string_lossy().contains(".solofocus"));
        assert!(get_config_path().starts_with(&app_dir));
        assert!(get_default_data_path().to_string_lossy().ends_with("dashboard.json"));
        assert!(get_log_path().to_string_lossy().ends_with("solofocus.log"));
    }
}
