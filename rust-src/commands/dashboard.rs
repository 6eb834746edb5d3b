//! Dashboard command: KPI cards, contribution heatmap and period chart.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::models::{DashboardData, DataError, Period};
use crate::visualization::{render_dashboard, DashboardState};


/// Run the dashboard command.
pub fn run(period: Period, data_path: &Path) -> Result<()> {
    let Some(data) = load_data(data_path)? else {
        return Ok(());
    };

    let state = DashboardState::new(data, Local::now().date_naive(), period);
    let columns = crossterm::terminal::size().ok().map(|(width, _)| width as usize);

    render_dashboard(&state, columns, false).context("Failed to write dashboard")?;
    Ok(())
}


/// Read the data file, printing a hint instead of failing when it does not exist.
pub fn load_data(data_path: &Path) -> Result<Option<DashboardData>> {
    match DashboardData::load(data_path) {
        Ok(data) => {
            if data.is_empty() {
                println!("No focus sessions recorded yet. Start one with 'solofocus timer'.");
                println!();
            }
            Ok(Some(data))
        }
        Err(DataError::NotFound(path)) => {
            println!("No dashboard data found at {}.", path.display());
            println!("Point --data (or SOLOFOCUS_DATA) at an exported dashboard JSON file.");
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to load dashboard data"),
    }
}
