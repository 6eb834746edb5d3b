//! Export command for heatmap generation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

use crate::aggregation::build_heatmap;
use crate::config::get_app_dir;
use crate::visualization::{export_heatmap_png, export_heatmap_svg, open_file};

use super::dashboard::load_data;


/// Run the export command.
pub fn run(svg: bool, should_open: bool, data_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let Some(data) = load_data(data_path)? else {
        return Ok(());
    };

    // Determine format and output path
    let format_type = if svg { "svg" } else { "png" };
    let output_path = match output {
        Some(path) => path,
        None => {
            let default_dir = get_app_dir();
            std::fs::create_dir_all(&default_dir)?;
            default_dir.join(format!("solofocus-heatmap.{format_type}"))
        }
    };

    let grid = build_heatmap(&data, Local::now().date_naive());

    println!("Exporting to {}...", format_type.to_uppercase());

    if svg {
        export_heatmap_svg(&grid, &output_path, None)?;
    } else {
        export_heatmap_png(&grid, &output_path, None)?;
    }

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    // Open if requested
    if should_open {
        println!("Opening {}...", format_type.to_uppercase());
        open_file(&output_path)?;
    }

    Ok(())
}
