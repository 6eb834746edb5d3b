//! Contribution heatmap bucketing.

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::{GRAPH_DAYS_PER_WEEK, HEATMAP_WINDOW_DAYS};
use crate::models::DashboardData;


/// Discrete intensity bucket for one day of focus time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeatLevel {
    None = 0,
    Light = 1,
    Medium = 2,
    Strong = 3,
    Intense = 4,
}


impl HeatLevel {
    pub const ALL: [HeatLevel; 5] = [
        HeatLevel::None,
        HeatLevel::Light,
        HeatLevel::Medium,
        HeatLevel::Strong,
        HeatLevel::Intense,
    ];

    /// Bucket minutes at the 1 / 30 / 60 / 120 thresholds.
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            0 => HeatLevel::None,
            1..=29 => HeatLevel::Light,
            30..=59 => HeatLevel::Medium,
            60..=119 => HeatLevel::Strong,
            _ => HeatLevel::Intense,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}


/// A rendered day of the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatCell {
    pub date: NaiveDate,
    pub minutes: u32,
    pub level: HeatLevel,
}


impl HeatCell {
    pub fn date_key(&self) -> String {
        date_key(self.date)
    }
}


/// Month name marker placed above a week column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLabel {
    pub week_index: usize,
    pub month: u32,
}


impl MonthLabel {
    pub fn name(&self) -> &'static str {
        month_abbrev(self.month)
    }
}


/// One week column, Sunday first. `None` marks days after today.
pub type Week = [Option<HeatCell>; GRAPH_DAYS_PER_WEEK];


/// The 52-week contribution grid ending today.
#[derive(Debug, Clone)]
pub struct HeatmapGrid {
    pub start: NaiveDate,
    pub today: NaiveDate,
    pub weeks: Vec<Week>,
    pub month_labels: Vec<MonthLabel>,
    /// Days in the window with any focus time.
    pub active_days: usize,
}


impl HeatmapGrid {
    /// Calendar year the window ends in.
    pub fn year(&self) -> i32 {
        self.today.year()
    }

    pub fn cell_count(&self) -> usize {
        self.weeks.len() * GRAPH_DAYS_PER_WEEK
    }

    /// Iterate over all non-empty cells in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = &HeatCell> {
        self.weeks.iter().flat_map(|week| week.iter().flatten())
    }
}


/// Build the heatmap grid for the window ending at `today`.
pub fn build_heatmap(data: &DashboardData, today: NaiveDate) -> HeatmapGrid {
    let start = window_start(today);

    let mut weeks = Vec::new();
    let mut active_days = 0;
    let mut current = start;

    while current <= today {
        let mut week: Week = [None; GRAPH_DAYS_PER_WEEK];
        for slot in week.iter_mut() {
            if current <= today {
                let minutes = data.contribution_minutes(&date_key(current));
                if minutes > 0 {
                    active_days += 1;
                }
                *slot = Some(HeatCell {
                    date: current,
                    minutes,
                    level: HeatLevel::from_minutes(minutes),
                });
            }
            current += Duration::days(1);
        }
        weeks.push(week);
    }

    let month_labels = month_labels(&weeks);

    HeatmapGrid {
        start,
        today,
        weeks,
        month_labels,
        active_days,
    }
}


/// First day of the grid: 364 days back, moved to the preceding Sunday.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    let start = today - Duration::days(HEATMAP_WINDOW_DAYS);
    let offset = start.weekday().num_days_from_sunday() as i64;
    start - Duration::days(offset)
}


/// Month markers where a column's first day changes month. Column 0 is never labelled.
fn month_labels(weeks: &[Week]) -> Vec<MonthLabel> {
    let mut labels = Vec::new();
    let mut last_month = None;

    for (week_index, week) in weeks.iter().enumerate().skip(1) {
        let Some(first_day) = week.iter().flatten().next() else { continue };
        let month = first_day.date.month();
        if last_month != Some(month) {
            labels.push(MonthLabel { week_index, month });
            last_month = Some(month);
        }
    }

    labels
}


/// `YYYY-MM-DD` key used by the backend maps.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}


/// Get month abbreviation.
pub fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
