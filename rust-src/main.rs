//! SoloFocus CLI
//!
//! Pomodoro timer with session reporting and a focus dashboard.

mod aggregation;
mod cli;
mod client;
mod commands;
mod config;
mod logging;
mod models;
mod timer;
mod tui;
mod visualization;


fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
