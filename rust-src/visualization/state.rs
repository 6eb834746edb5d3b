//! Dashboard view state and the rendering interface.

use chrono::NaiveDate;

use crate::aggregation::{build_heatmap, DashboardSummary, HeatmapGrid, PeriodChart};
use crate::models::{DashboardData, Period};


/// A surface the dashboard can be drawn on.
pub trait DashboardRenderer {
    type Error;

    fn render_summary(&mut self, summary: &DashboardSummary, grid: &HeatmapGrid) -> Result<(), Self::Error>;
    fn render_heatmap(&mut self, grid: &HeatmapGrid) -> Result<(), Self::Error>;
    fn render_chart(&mut self, chart: &PeriodChart) -> Result<(), Self::Error>;
}


/// Everything the dashboard shows, computed from one data document.
#[derive(Debug, Clone)]
pub struct DashboardState {
    data: DashboardData,
    today: NaiveDate,
    summary: DashboardSummary,
    heatmap: HeatmapGrid,
    chart: Option<PeriodChart>,
    period: Period,
}


impl DashboardState {
    pub fn new(data: DashboardData, today: NaiveDate, period: Period) -> Self {
        let summary = DashboardSummary::from_data(&data, today);
        let heatmap = build_heatmap(&data, today);

        let mut state = Self {
            data,
            today,
            summary,
            heatmap,
            chart: None,
            period,
        };
        state.switch_period(period);
        state
    }

    /// Replace the chart with one for `period`; the previous chart is dropped first.
    pub fn switch_period(&mut self, period: Period) {
        self.chart.take();
        self.period = period;
        self.chart = Some(PeriodChart::build(&self.data, period, self.today));
    }

    /// Swap in fresh data, keeping the selected period.
    pub fn reload(&mut self, data: DashboardData, today: NaiveDate) {
        *self = Self::new(data, today, self.period);
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    pub fn heatmap(&self) -> &HeatmapGrid {
        &self.heatmap
    }

    pub fn chart(&self) -> Option<&PeriodChart> {
        self.chart.as_ref()
    }

    /// Draw every section onto `renderer`.
    pub fn render<R: DashboardRenderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        renderer.render_summary(&self.summary, &self.heatmap)?;
        renderer.render_heatmap(&self.heatmap)?;
        if let Some(chart) = &self.chart {
            renderer.render_chart(chart)?;
        }
        Ok(())
    }
}
