//! Configuration and settings for SoloFocus.

mod app_config;
mod settings;

#[allow(unused_imports)]
pub use app_config::{AppConfig, ConfigError, DashboardConfig, ServerConfig, TimerConfig};
#[allow(unused_imports)]
pub use settings::{
    get_app_dir,
    get_config_path,
    get_default_data_path,
    get_log_path,
    DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_URL,
    GRAPH_DAYS_PER_WEEK,
    GRAPH_WEEKS,
    HEATMAP_WINDOW_DAYS,
    REDIRECT_DELAY,
    RING_RADIUS,
    STATUS_DURATION,
    TICK_INTERVAL,
};
