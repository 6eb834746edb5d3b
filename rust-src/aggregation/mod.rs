//! Aggregation layer: heatmap buckets, period series and summary figures.

mod heatmap;
mod period;
mod summary;

#[allow(unused_imports)]
pub use heatmap::{
    build_heatmap, date_key, month_abbrev, window_start, HeatCell, HeatLevel, HeatmapGrid,
    MonthLabel,
};
pub use period::{BarTone, ChartSeries, PeriodChart, YAxis};
pub use summary::DashboardSummary;
