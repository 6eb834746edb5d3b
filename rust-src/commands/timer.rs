//! Interactive Pomodoro timer command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::client::{HttpSessionApi, SessionDispatcher};
use crate::config::{ServerConfig, TimerConfig};
use crate::models::{Period, TimerMode};
use crate::tui::{self, App};


/// Run the timer command.
pub fn run(
    mode: TimerMode,
    timer: TimerConfig,
    server: &ServerConfig,
    offline: bool,
    data_path: PathBuf,
) -> Result<()> {
    let dispatcher = if offline {
        tracing::info!("Running offline; sessions are not reported");
        None
    } else {
        let api = HttpSessionApi::new(&server.url, Duration::from_secs(server.request_timeout_secs))
            .context("Failed to create session client")?;
        tracing::info!(server = api.base_url(), "Reporting sessions");
        Some(SessionDispatcher::spawn(api))
    };

    let app = App::new(timer, mode, dispatcher, data_path, Period::default());
    tui::run(app)
}
