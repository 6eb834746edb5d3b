//! Text formatting for durations, tooltips and axis ticks.

use chrono::NaiveDate;

use crate::aggregation::HeatCell;


/// `45 minutes`, `1 minute`, `2h 5m`, `1 hour`, `3 hours`.
pub fn format_duration(minutes: u32) -> String {
    if minutes == 0 {
        return "No focus time".to_string();
    }
    if minutes < 60 {
        return format!("{} minute{}", minutes, plural(minutes));
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{} hour{}", hours, plural(hours))
    }
}


/// `Monday, October 19, 2026`.
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}


/// Hover text for a heatmap cell.
pub fn cell_tooltip(cell: &HeatCell) -> String {
    format!("{} on {}", format_duration(cell.minutes), format_full_date(cell.date))
}


/// Hover text for a chart bar.
pub fn bar_tooltip(minutes: u32) -> String {
    match minutes {
        0 => "😴 No focus time".to_string(),
        1..=29 => format!("🌱 {minutes}m - Getting started!"),
        30..=59 => format!("🌿 {minutes}m - Good progress!"),
        60..=119 => format!("🌳 {} - Great work!", compact_hours(minutes)),
        _ => format!("🔥 {} - On fire!", compact_hours(minutes)),
    }
}


/// `2h 5m` or `2h`.
pub fn compact_hours(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{hours}h")
    }
}


/// Y-axis tick label for a value in minutes.
pub fn tick_label(value_minutes: u32) -> String {
    if value_minutes == 0 {
        return "0".to_string();
    }

    let hours = value_minutes as f64 / 60.0;
    if hours >= 10.0 {
        format!("{}h", hours.round() as u32)
    } else if hours.fract() == 0.0 {
        format!("{}h", hours as u32)
    } else {
        format!("{hours:.1}h")
    }
}


fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}
