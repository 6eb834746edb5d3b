//! Data models for dashboard series, sessions and timer modes.

mod dashboard_data;
mod session;
mod timer_mode;

pub use dashboard_data::{whole_minutes, DashboardData, DataError, MinuteMap};
pub use session::SessionId;
pub use timer_mode::{Period, TimerMode};
