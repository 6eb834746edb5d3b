//! CLI definitions using clap.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::config::{get_log_path, AppConfig};
use crate::logging;
use crate::models::{Period, TimerMode};


/// SoloFocus - Pomodoro timer and focus dashboard
#[derive(Parser)]
#[command(name = "solofocus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}


#[derive(Subcommand)]
enum Commands {
    /// Show focus dashboard with KPI cards, heatmap and period chart
    Dashboard {
        /// Bar chart period
        #[arg(short, long, value_enum, default_value_t = Period::Week)]
        period: Period,

        /// Dashboard data file (JSON)
        #[arg(long, env = "SOLOFOCUS_DATA")]
        data: Option<PathBuf>,
    },

    /// Export the contribution heatmap as PNG or SVG
    Export {
        /// Export as SVG instead of PNG
        #[arg(long)]
        svg: bool,

        /// Open file after export
        #[arg(long)]
        open: bool,

        /// Dashboard data file (JSON)
        #[arg(long, env = "SOLOFOCUS_DATA")]
        data: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the interactive Pomodoro timer
    Timer {
        /// Mode to start in
        #[arg(short, long, value_enum, default_value_t = TimerMode::Focus)]
        mode: TimerMode,

        /// Session server base URL
        #[arg(long, env = "SOLOFOCUS_SERVER_URL")]
        server: Option<String>,

        /// Do not report sessions to the server
        #[arg(long)]
        offline: bool,

        /// Dashboard data file (JSON)
        #[arg(long, env = "SOLOFOCUS_DATA")]
        data: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Config,
}


/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Timer { mode, server, offline, data }) => {
            logging::init_file(&get_log_path())?;
            let mut config = AppConfig::load_default();
            if let Some(url) = server {
                config.server.url = url;
            }
            let data_path = data.unwrap_or(config.dashboard.data_path);
            commands::timer::run(mode, config.timer, &config.server, offline, data_path)?;
        }
        Some(Commands::Dashboard { period, data }) => {
            logging::init_stderr();
            let config = AppConfig::load_default();
            let data_path = data.unwrap_or(config.dashboard.data_path);
            commands::dashboard::run(period, &data_path)?;
        }
        Some(Commands::Export { svg, open, data, output }) => {
            logging::init_stderr();
            let config = AppConfig::load_default();
            let data_path = data.unwrap_or(config.dashboard.data_path);
            commands::export::run(svg, open, &data_path, output)?;
        }
        Some(Commands::Config) => {
            logging::init_stderr();
            commands::config::run(&AppConfig::load_default())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
