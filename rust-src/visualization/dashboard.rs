//! Dashboard rendering using terminal output.

use std::io::{self, Write};

use crate::aggregation::{BarTone, DashboardSummary, HeatLevel, HeatmapGrid, PeriodChart};
use crate::config::GRAPH_DAYS_PER_WEEK;

use super::export::default_title;
use super::format::{bar_tooltip, format_duration, tick_label};
use super::state::{DashboardRenderer, DashboardState};


// Constants
const GREEN: &str = "\x1b[38;5;35m";
const RED: &str = "\x1b[38;5;203m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 8;
const HEAT_CELL: &str = "■";

/// 256-colour codes for the five heat levels, empty first.
const HEAT_COLORS: [&str; 5] = [
    "\x1b[38;5;237m",
    "\x1b[38;5;22m",
    "\x1b[38;5;28m",
    "\x1b[38;5;34m",
    "\x1b[38;5;46m",
];

const DAY_LABELS: [&str; GRAPH_DAYS_PER_WEEK] = ["", "Mon", "", "Wed", "", "Fri", ""];


/// Plain-text dashboard writer.
pub struct AnsiRenderer<W: Write> {
    out: W,
    /// Widest heatmap the target can show, in week columns.
    max_weeks: usize,
}


impl<W: Write> AnsiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, max_weeks: usize::MAX }
    }

    /// Limit the heatmap to the trailing weeks that fit in `columns` characters.
    pub fn with_width(mut self, columns: usize) -> Self {
        self.max_weeks = columns.saturating_sub(5) / 2;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}


impl<W: Write> DashboardRenderer for AnsiRenderer<W> {
    type Error = io::Error;

    fn render_summary(&mut self, summary: &DashboardSummary, grid: &HeatmapGrid) -> io::Result<()> {
        let width = 24;
        let border = "─".repeat(width - 2);

        let cards = [
            ("Total Focus", format!("{:.1}h", summary.total_hours)),
            ("Current Streak", streak(summary.current_streak)),
            ("Best Streak", streak(summary.max_streak)),
        ];

        writeln!(self.out, "┌{border}┐  ┌{border}┐  ┌{border}┐")?;
        writeln!(
            self.out,
            "│{:^22}│  │{:^22}│  │{:^22}│",
            cards[0].0, cards[1].0, cards[2].0
        )?;
        writeln!(
            self.out,
            "│{BOLD}{GREEN}{:^22}{RESET}│  │{BOLD}{:^22}{RESET}│  │{BOLD}{:^22}{RESET}│",
            cards[0].1, cards[1].1, cards[2].1
        )?;
        writeln!(self.out, "└{border}┘  └{border}┘  └{border}┘")?;

        writeln!(self.out, "{DIM}{}{RESET}", default_title(grid))?;
        if let Some(last) = &summary.last_session {
            writeln!(self.out, "{DIM}Last session: {RESET}{CYAN}{last}{RESET}")?;
        }
        writeln!(self.out)
    }

    fn render_heatmap(&mut self, grid: &HeatmapGrid) -> io::Result<()> {
        if self.max_weeks == 0 {
            return Ok(());
        }

        let skip = grid.weeks.len().saturating_sub(self.max_weeks);
        let weeks = &grid.weeks[skip..];

        // Month row: each column is two characters wide.
        let mut month_row = vec![' '; weeks.len() * 2 + 2];
        for label in grid.month_labels.iter().filter(|l| l.week_index >= skip) {
            let column = (label.week_index - skip) * 2;
            for (offset, c) in label.name().chars().enumerate() {
                if let Some(slot) = month_row.get_mut(column + offset) {
                    *slot = c;
                }
            }
        }
        let month_row: String = month_row.into_iter().collect();
        writeln!(self.out, "{:5}{DIM}{}{RESET}", "", month_row.trim_end())?;

        for (day, label) in DAY_LABELS.iter().enumerate() {
            write!(self.out, "{DIM}{label:<4}{RESET} ")?;
            for week in weeks {
                match week[day] {
                    Some(cell) => write!(self.out, "{}{HEAT_CELL}{RESET} ", HEAT_COLORS[cell.level.index()])?,
                    None => write!(self.out, "  ")?,
                }
            }
            writeln!(self.out)?;
        }

        write!(self.out, "{:5}{DIM}Less{RESET} ", "")?;
        for level in HeatLevel::ALL {
            write!(self.out, "{}{HEAT_CELL}{RESET} ", HEAT_COLORS[level.index()])?;
        }
        writeln!(self.out, "{DIM}More{RESET}")?;
        writeln!(self.out)
    }

    fn render_chart(&mut self, chart: &PeriodChart) -> io::Result<()> {
        writeln!(self.out, "{BOLD}{}{RESET}", chart.description())?;

        if chart.series.minutes.is_empty() {
            return writeln!(self.out, "{DIM}No focus sessions yet{RESET}");
        }

        writeln!(
            self.out,
            "{DIM}{:LABEL_WIDTH$} 0{:>width$}{RESET}",
            "",
            tick_label(chart.axis.max_minutes),
            width = BAR_WIDTH - 1,
        )?;

        for (label, minutes, tone) in chart.bars() {
            let bar = create_bar(minutes, chart.axis.max_minutes, BAR_WIDTH, tone_color(tone));
            writeln!(self.out, "{label:LABEL_WIDTH$} {bar} {CYAN}{}{RESET}", bar_tooltip(minutes))?;
        }

        writeln!(
            self.out,
            "{DIM}Total: {}{RESET}",
            format_duration(chart.series.total_minutes().min(u32::MAX as u64) as u32)
        )
    }
}


/// Print the whole dashboard to stdout.
pub fn render_dashboard(state: &DashboardState, columns: Option<usize>, clear_screen: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if clear_screen {
        write!(out, "\x1b[2J\x1b[H")?;
    }

    let mut renderer = AnsiRenderer::new(&mut out);
    if let Some(columns) = columns {
        renderer = renderer.with_width(columns);
    }
    state.render(&mut renderer)?;

    writeln!(
        out,
        "{DIM}Tip: Export the heatmap with {RESET}{CYAN}solofocus export --open{RESET}"
    )?;
    out.flush()
}


/// Create a simple text bar for visualization.
fn create_bar(value: u32, max_value: u32, width: usize, color: &str) -> String {
    if max_value == 0 {
        return format!("{DIM}{}{RESET}", "░".repeat(width));
    }

    let filled = ((value as f64 / max_value as f64) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!(
        "{}{}{}{}{}{}",
        color,
        "█".repeat(filled),
        RESET,
        DIM,
        "░".repeat(width - filled),
        RESET,
    )
}


fn tone_color(tone: BarTone) -> &'static str {
    match tone {
        BarTone::Idle => DIM,
        BarTone::Light => HEAT_COLORS[1],
        BarTone::Medium => HEAT_COLORS[2],
        BarTone::Strong => HEAT_COLORS[3],
        BarTone::Hot => RED,
    }
}


fn streak(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
