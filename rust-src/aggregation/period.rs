//! Period bar-chart series: labels, values, axis and bar tones.

use chrono::{Duration, NaiveDate};

use crate::models::{whole_minutes, DashboardData, MinuteMap, Period};

use super::heatmap::date_key;


/// Colour band of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BarTone {
    Idle,
    Light,
    Medium,
    Strong,
    Hot,
}


impl BarTone {
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            0 => BarTone::Idle,
            1..=29 => BarTone::Light,
            30..=59 => BarTone::Medium,
            60..=119 => BarTone::Strong,
            _ => BarTone::Hot,
        }
    }
}


/// Y-axis ceiling and tick step, both in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YAxis {
    pub max_minutes: u32,
    pub step_minutes: u32,
}


impl YAxis {
    /// Ceiling rounded up to a "nice" hour step.
    pub fn for_values(minutes: &[u32]) -> Self {
        let largest = minutes.iter().copied().filter(|m| *m > 0).max().unwrap_or(0).max(60);
        let max_hours = largest.div_ceil(60);

        let step_minutes = match max_hours {
            0..=2 => 30,
            3..=6 => 60,
            7..=12 => 120,
            13..=24 => 180,
            _ => 360,
        };
        let ceiling = (max_hours as u64 * 60).div_ceil(step_minutes as u64) * step_minutes as u64;
        let max_minutes = ceiling.min(u32::MAX as u64) as u32;

        Self { max_minutes, step_minutes }
    }
}


/// Series prepared for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub period: Period,
    pub labels: Vec<String>,
    pub minutes: Vec<u32>,
}


impl ChartSeries {
    /// Select and format the aggregate map for `period`.
    pub fn prepare(data: &DashboardData, period: Period, today: NaiveDate) -> Self {
        let (labels, minutes) = match period {
            Period::Week => last_seven_days(&data.weekly_data, today),
            Period::Month => sorted_series(&data.monthly_data, day_month_label),
            Period::Year => sorted_series(&data.yearly_data, month_year_label),
        };

        Self { period, labels, minutes }
    }

    pub fn total_minutes(&self) -> u64 {
        self.minutes.iter().map(|m| *m as u64).sum()
    }
}


/// A fully computed bar chart: series, axis and per-bar tones.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodChart {
    pub series: ChartSeries,
    pub axis: YAxis,
    pub tones: Vec<BarTone>,
}


impl PeriodChart {
    pub fn build(data: &DashboardData, period: Period, today: NaiveDate) -> Self {
        let series = ChartSeries::prepare(data, period, today);
        let axis = YAxis::for_values(&series.minutes);
        let tones = series.minutes.iter().map(|m| BarTone::from_minutes(*m)).collect();

        Self { series, axis, tones }
    }

    pub fn description(&self) -> &'static str {
        self.series.period.description()
    }

    pub fn bars(&self) -> impl Iterator<Item = (&str, u32, BarTone)> {
        self.series
            .labels
            .iter()
            .zip(&self.series.minutes)
            .zip(&self.tones)
            .map(|((label, minutes), tone)| (label.as_str(), *minutes, *tone))
    }
}


/// The seven days ending today, oldest first, labelled by weekday.
fn last_seven_days(map: &MinuteMap, today: NaiveDate) -> (Vec<String>, Vec<u32>) {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let minutes = map.get(&date_key(date)).copied().map(whole_minutes).unwrap_or(0);
            (date.format("%a").to_string(), minutes)
        })
        .unzip()
}


/// Keys in sorted order with their rounded values.
fn sorted_series(map: &MinuteMap, label: fn(&str) -> String) -> (Vec<String>, Vec<u32>) {
    map.iter()
        .map(|(key, value)| (label(key), whole_minutes(*value)))
        .unzip()
}


/// `2026-10-19` → `Oct 19`.
fn day_month_label(key: &str) -> String {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|_| key.to_string())
}


/// `2026-10` → `Oct 26`.
fn month_year_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %y").to_string())
        .unwrap_or_else(|_| key.to_string())
}
