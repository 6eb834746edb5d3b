//! Visualization layer for dashboards and charts.

mod dashboard;
mod export;
mod format;
mod state;

#[allow(unused_imports)]
pub use dashboard::{render_dashboard, AnsiRenderer};
pub use export::{default_title, export_heatmap_png, export_heatmap_svg, generate_svg, open_file};
#[allow(unused_imports)]
pub use format::{bar_tooltip, cell_tooltip, compact_hours, format_duration, format_full_date, tick_label};
pub use state::{DashboardRenderer, DashboardState};
