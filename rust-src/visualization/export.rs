//! Export functionality for heatmap visualizations.

use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregation::{HeatLevel, HeatmapGrid};
use crate::config::GRAPH_DAYS_PER_WEEK;

use super::format::cell_tooltip;


// Dark dashboard colour scheme
const BG: &str = "#0d1117";
const TEXT: &str = "#e6edf3";
const TEXT_SECONDARY: &str = "#8b949e";
const FUTURE_CELL: &str = "#161b22";

/// Fill for each heat level, empty first.
const LEVEL_COLORS: [&str; 5] = ["#2d333b", "#0e4429", "#006d32", "#26a641", "#39d353"];

// Cell dimensions (scaled for sharp output)
const SCALE_FACTOR: i32 = 3;
const CELL_SIZE: i32 = 11 * SCALE_FACTOR;
const CELL_GAP: i32 = 3 * SCALE_FACTOR;
const CELL_TOTAL: i32 = CELL_SIZE + CELL_GAP;
const GRID_X: i32 = 40 * SCALE_FACTOR / 2;
const GRID_Y: i32 = 60;


/// Export heatmap as SVG.
pub fn export_heatmap_svg(grid: &HeatmapGrid, output_path: &Path, title: Option<&str>) -> Result<()> {
    let svg_content = generate_svg(grid, title);

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    tracing::info!(path = %output_path.display(), "Exported SVG heatmap");
    Ok(())
}


/// Export heatmap as PNG.
pub fn export_heatmap_png(grid: &HeatmapGrid, output_path: &Path, title: Option<&str>) -> Result<()> {
    let svg_content = generate_svg(grid, title);

    let tree = resvg::usvg::Tree::from_str(&svg_content, &resvg::usvg::Options::default())
        .context("Failed to parse SVG")?;

    let size = tree.size();
    let width = size.width() as u32;
    let height = size.height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).context("Failed to create pixmap")?;

    let bg = hex_to_rgb(BG);
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.0, bg.1, bg.2, 255));

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap
        .save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    tracing::info!(path = %output_path.display(), "Exported PNG heatmap");
    Ok(())
}


/// Heading shown above the grid: `12 days of focus in 2026 (last year)`.
pub fn default_title(grid: &HeatmapGrid) -> String {
    let days = grid.active_days;
    let noun = if days == 1 { "day" } else { "days" };
    format!("{days} {noun} of focus in {} (last year)", grid.year())
}


/// Generate SVG content for the heatmap.
pub fn generate_svg(grid: &HeatmapGrid, title: Option<&str>) -> String {
    let num_weeks = grid.weeks.len() as i32;
    let width = GRID_X + (num_weeks * CELL_TOTAL) + 20;
    let height = GRID_Y + (GRAPH_DAYS_PER_WEEK as i32 * CELL_TOTAL) + 60;

    let default_title = default_title(grid);
    let display_title = escape(title.unwrap_or(&default_title));

    let mut svg_parts = vec![
        format!(r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#),
        "<style>".to_string(),
        format!("  .day-cell {{ stroke: {BG}; stroke-width: 1; }}"),
        format!("  .month-label {{ fill: {TEXT_SECONDARY}; font: 14px -apple-system, sans-serif; }}"),
        format!("  .day-label {{ fill: {TEXT_SECONDARY}; font: 12px -apple-system, sans-serif; }}"),
        format!("  .title {{ fill: {TEXT}; font: bold 18px -apple-system, sans-serif; }}"),
        format!("  .legend-text {{ fill: {TEXT_SECONDARY}; font: 12px -apple-system, sans-serif; }}"),
        "</style>".to_string(),
        format!(r#"<rect width="{width}" height="{height}" fill="{BG}"/>"#),
        format!(r#"<text x="10" y="28" class="title">{display_title}</text>"#),
    ];

    // Day labels
    for (day_idx, day_name) in ["", "Mon", "", "Wed", "", "Fri", ""].iter().enumerate() {
        if day_name.is_empty() {
            continue;
        }
        let y = GRID_Y + (day_idx as i32 * CELL_TOTAL) + (CELL_SIZE / 2) + 4;
        svg_parts.push(format!(r#"<text x="5" y="{y}" class="day-label">{day_name}</text>"#));
    }

    // Month labels
    for label in &grid.month_labels {
        let x = GRID_X + (label.week_index as i32 * CELL_TOTAL);
        svg_parts.push(format!(
            r#"<text x="{x}" y="{}" class="month-label">{}</text>"#,
            GRID_Y - 10,
            label.name()
        ));
    }

    // Heatmap cells
    for (week_idx, week) in grid.weeks.iter().enumerate() {
        for (day_idx, slot) in week.iter().enumerate() {
            let x = GRID_X + (week_idx as i32 * CELL_TOTAL);
            let y = GRID_Y + (day_idx as i32 * CELL_TOTAL);

            match slot {
                Some(cell) => svg_parts.push(format!(
                    r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" rx="4" fill="{}" class="day-cell" data-date="{}" data-level="{}"><title>{}</title></rect>"#,
                    level_color(cell.level),
                    cell.date_key(),
                    cell.level.index(),
                    escape(&cell_tooltip(cell)),
                )),
                None => svg_parts.push(format!(
                    r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" rx="4" fill="{FUTURE_CELL}" class="day-cell"/>"#
                )),
            }
        }
    }

    // Legend
    let legend_y = height - 20;
    let legend_x = GRID_X;
    svg_parts.push(format!(r#"<text x="{legend_x}" y="{legend_y}" class="legend-text">Less</text>"#));

    for level in HeatLevel::ALL {
        let x = legend_x + 40 + (level.index() as i32 * (CELL_SIZE + 4));
        svg_parts.push(format!(
            r#"<rect x="{x}" y="{}" width="{CELL_SIZE}" height="{CELL_SIZE}" rx="4" fill="{}" class="day-cell"/>"#,
            legend_y - CELL_SIZE + 8,
            level_color(level),
        ));
    }

    svg_parts.push(format!(
        r#"<text x="{}" y="{legend_y}" class="legend-text">More</text>"#,
        legend_x + 40 + (HeatLevel::ALL.len() as i32 * (CELL_SIZE + 4)) + 5,
    ));

    svg_parts.push("</svg>".to_string());

    svg_parts.join("\n")
}


fn level_color(level: HeatLevel) -> &'static str {
    LEVEL_COLORS[level.index()]
}


fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}


/// Convert hex color to RGB tuple.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range).and_then(|s| u8::from_str_radix(s, 16).ok()).unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}


/// Open file with default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}
