//! Headline figures for the dashboard KPI cards.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::models::{whole_minutes, DashboardData};


/// Totals and streaks shown above the heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_hours: f64,
    pub current_streak: u32,
    pub max_streak: u32,
    pub last_session: Option<String>,
}


impl DashboardSummary {
    /// Prefer the backend's figures; derive the rest from the contribution map.
    pub fn from_data(data: &DashboardData, today: NaiveDate) -> Self {
        let active = active_dates(data);

        let total_hours = data.total_hours.unwrap_or_else(|| {
            let minutes: u64 = data
                .contribution_data
                .values()
                .map(|m| whole_minutes(*m) as u64)
                .sum();
            minutes as f64 / 60.0
        });

        let current_streak = data
            .current_streak
            .unwrap_or_else(|| current_streak(&active, today));

        let max_streak = data
            .max_streak
            .unwrap_or_else(|| longest_streak(&active))
            .max(current_streak);

        let last_session = data
            .last_session_time
            .clone()
            .or_else(|| active.iter().next_back().map(|d| d.format("%Y-%m-%d").to_string()));

        Self {
            total_hours,
            current_streak,
            max_streak,
            last_session,
        }
    }
}


/// Dates with any focus minutes.
fn active_dates(data: &DashboardData) -> BTreeSet<NaiveDate> {
    data.contribution_data
        .iter()
        .filter(|(_, minutes)| whole_minutes(**minutes) > 0)
        .filter_map(|(key, _)| NaiveDate::parse_from_str(key, "%Y-%m-%d").ok())
        .collect()
}


/// Consecutive days ending at the most recent active day.
///
/// The streak is broken when that day is more than one day before `today`.
pub fn current_streak(active: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&latest) = active.range(..=today).next_back() else {
        return 0;
    };

    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 0;
    let mut day = latest;
    while active.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}


/// Longest run of consecutive active days.
pub fn longest_streak(active: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in active {
        run = match previous {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(date);
    }

    best
}


#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn data_with(entries: &[(&str, f64)]) -> DashboardData {
        let mut data = DashboardData::default();
        for (key, minutes) in entries {
            data.contribution_data.insert(key.to_string(), *minutes);
        }
        data
    }

    #[test]
    fn test_streak_counts_back_from_yesterday() {
        let data = data_with(&[
            ("2026-10-16", 30.0),
            ("2026-10-17", 25.0),
            ("2026-10-18", 50.0),
        ]);
        let summary = DashboardSummary::from_data(&data, day(19));

        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.max_streak, 3);
        assert_eq!(summary.last_session.as_deref(), Some("2026-10-18"));
    }

    #[test]
    fn test_streak_broken_after_gap() {
        let data = data_with(&[("2026-10-10", 30.0), ("2026-10-11", 30.0), ("2026-10-17", 30.0)]);
        let summary = DashboardSummary::from_data(&data, day(19));

        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.max_streak, 2);
    }

    #[test]
    fn test_zero_minute_days_do_not_count() {
        let data = data_with(&[("2026-10-18", 0.0), ("2026-10-19", 25.0)]);
        let summary = DashboardSummary::from_data(&data, day(19));

        assert_eq!(summary.current_streak, 1);
        assert!((summary.total_hours - 25.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_backend_figures_win() {
        let mut data = data_with(&[("2026-10-19", 25.0)]);
        data.total_hours = Some(40.5);
        data.current_streak = Some(7);
        data.max_streak = Some(12);
        data.last_session_time = Some("2026-10-19T08:00:00".into());

        let summary = DashboardSummary::from_data(&data, day(19));
        assert_eq!(summary.total_hours, 40.5);
        assert_eq!(summary.current_streak, 7);
        assert_eq!(summary.max_streak, 12);
        assert_eq!(summary.last_session.as_deref(), Some("2026-10-19T08:00:00"));
    }

    #[test]
    fn test_empty_data() {
        let summary = DashboardSummary::from_data(&DashboardData::default(), day(19));
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.max_streak, 0);
        assert_eq!(summary.total_hours, 0.0);
        assert!(summary.last_session.is_none());
    }
}
