//! Drawing for the timer, dashboard and settings views.

use ratatui::{prelude::*, widgets::*};

use crate::aggregation::{BarTone, HeatLevel, HeatmapGrid, PeriodChart};
use crate::config::GRAPH_DAYS_PER_WEEK;
use crate::models::{Period, TimerMode};
use crate::timer::{RunState, StatusKind};
use crate::visualization::{compact_hours, default_title, format_duration};

use super::app::{App, View};


const ACCENT: Color = Color::Rgb(16, 185, 129);
const BORDER: Color = Color::DarkGray;
const HEAT_COLORS: [Color; 5] = [
    Color::Rgb(45, 51, 59),
    Color::Rgb(14, 68, 41),
    Color::Rgb(0, 109, 50),
    Color::Rgb(38, 166, 65),
    Color::Rgb(57, 211, 83),
];
const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 8;


pub fn render_ui(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return;
    }

    match app.view {
        View::Timer => render_timer(f, app, area),
        View::Dashboard => render_dashboard(f, app, area),
        View::Settings => render_settings(f, app, area),
    }
}


fn render_timer(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let titles: Vec<Line> = TimerMode::ALL.iter().map(|m| Line::from(m.label())).collect();
    let selected = TimerMode::ALL.iter().position(|m| *m == app.timer.mode()).unwrap_or(0);
    let title = if app.is_offline() { " 🍅 SoloFocus (offline) " } else { " 🍅 SoloFocus " };
    f.render_widget(
        Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(mode_color(app.timer.mode())).add_modifier(Modifier::BOLD))
            .divider("•")
            .block(frame_block(title)),
        chunks[0],
    );

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Percentage(20),
        ])
        .split(chunks[1]);

    let color = mode_color(app.timer.mode());
    let clock = match app.timer.edit_text() {
        Some(text) => Line::from(vec![
            Span::styled(text.to_string(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("▏", Style::default().fg(color).add_modifier(Modifier::SLOW_BLINK)),
        ]),
        None => Line::from(Span::styled(app.timer.clock(), Style::default().fg(color).add_modifier(Modifier::BOLD))),
    };
    f.render_widget(Paragraph::new(clock).alignment(Alignment::Center), sections[1]);

    let (state_text, state_color) = match app.timer.run_state() {
        RunState::Idle if app.timer.is_editing() => ("✎ EDITING  (mm:ss, Enter to apply)", Color::Cyan),
        RunState::Idle => ("■ READY", Color::Gray),
        RunState::Running => ("● RUNNING", Color::Green),
        RunState::Paused => ("⏸ PAUSED", Color::Yellow),
    };
    f.render_widget(
        Paragraph::new(state_text)
            .style(Style::default().fg(state_color))
            .alignment(Alignment::Center),
        sections[3],
    );

    if sections[4].width >= MIN_WIDTH {
        let ring = app.timer.progress();
        f.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                .gauge_style(Style::default().fg(color).bg(Color::Black))
                .ratio(ring.elapsed.clamp(0.0, 1.0)),
            sections[4],
        );
    }

    if let Some(status) = &app.status {
        let status_color = match status.kind {
            StatusKind::Success => Color::Green,
            StatusKind::Info => Color::Cyan,
        };
        f.render_widget(
            Paragraph::new(status.text.as_str())
                .style(Style::default().fg(status_color).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            sections[6],
        );
    }

    let controls = vec![
        Line::from(vec![
            span_key("Space"), Span::raw(" Start/Pause  •  "),
            span_key("R"), Span::raw(" Reset  •  "),
            span_key("1-3"), Span::raw(" Mode  •  "),
            span_key("E"), Span::raw(" Edit time"),
        ]),
        Line::from(vec![
            span_key("D"), Span::raw(" Dashboard  •  "),
            span_key("O"), Span::raw(" Settings  •  "),
            span_key("Q"), Span::raw(" Quit"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}


fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(GRAPH_DAYS_PER_WEEK as u16 + 3),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    let summary = app.dashboard.summary();
    let mut kpis = vec![
        Span::raw("Total "),
        Span::styled(format!("{:.1}h", summary.total_hours), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("  •  Streak "),
        Span::styled(format!("{}d", summary.current_streak), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  •  Best "),
        Span::styled(format!("{}d", summary.max_streak), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(last) = &summary.last_session {
        kpis.push(Span::raw("  •  Last "));
        kpis.push(Span::styled(last.clone(), Style::default().fg(Color::Cyan)));
    }
    f.render_widget(
        Paragraph::new(Line::from(kpis)).alignment(Alignment::Center).block(frame_block(" 📊 Dashboard ")),
        chunks[0],
    );

    render_heatmap(f, app.dashboard.heatmap(), chunks[1]);

    let periods: Vec<Line> = Period::ALL.iter().map(|p| Line::from(p.label())).collect();
    let selected = Period::ALL.iter().position(|p| *p == app.dashboard.period()).unwrap_or(0);
    f.render_widget(
        Tabs::new(periods)
            .select(selected)
            .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .divider("•"),
        chunks[2],
    );

    if let Some(chart) = app.dashboard.chart() {
        render_chart(f, chart, chunks[3]);
    }

    let controls = Line::from(vec![
        span_key("W/M/Y"), Span::raw(" Period  •  "),
        span_key("R"), Span::raw(" Reload  •  "),
        span_key("T"), Span::raw(" Timer  •  "),
        span_key("Q"), Span::raw(" Quit"),
    ]);
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}


/// Trailing weeks that fit, one column of `■ ` per week.
fn render_heatmap(f: &mut Frame, grid: &HeatmapGrid, area: Rect) {
    let inner_width = area.width.saturating_sub(2 + 5) as usize;
    let max_weeks = inner_width / 2;
    if max_weeks == 0 || area.height < GRAPH_DAYS_PER_WEEK as u16 + 3 {
        return;
    }

    let skip = grid.weeks.len().saturating_sub(max_weeks);
    let weeks = &grid.weeks[skip..];

    let mut month_row = vec![' '; weeks.len() * 2 + 2];
    for label in grid.month_labels.iter().filter(|l| l.week_index >= skip) {
        let column = (label.week_index - skip) * 2;
        for (offset, c) in label.name().chars().enumerate() {
            if let Some(slot) = month_row.get_mut(column + offset) {
                *slot = c;
            }
        }
    }

    let mut lines = vec![Line::from(vec![
        Span::raw("     "),
        Span::styled(month_row.into_iter().collect::<String>(), Style::default().fg(Color::DarkGray)),
    ])];

    for (day, label) in ["", "Mon", "", "Wed", "", "Fri", ""].iter().enumerate() {
        let mut spans = vec![Span::styled(format!("{label:<4} "), Style::default().fg(Color::DarkGray))];
        for week in weeks {
            spans.push(match week[day] {
                Some(cell) => Span::styled("■ ", Style::default().fg(HEAT_COLORS[cell.level.index()])),
                None => Span::raw("  "),
            });
        }
        lines.push(Line::from(spans));
    }

    let title = format!(" {} ", default_title(grid));
    let mut legend = vec![Span::raw(" Less ")];
    legend.extend(
        HeatLevel::ALL
            .iter()
            .map(|level| Span::styled("■ ", Style::default().fg(HEAT_COLORS[level.index()]))),
    );
    legend.push(Span::raw("More "));

    f.render_widget(
        Paragraph::new(lines).block(
            frame_block(&title).title_bottom(Line::from(legend).right_aligned()),
        ),
        area,
    );
}


fn render_chart(f: &mut Frame, chart: &PeriodChart, area: Rect) {
    let block = frame_block(&format!(" {} ", chart.description()));

    let count = chart.series.minutes.len() as u16;
    if count == 0 {
        f.render_widget(
            Paragraph::new("No focus sessions yet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let inner = area.width.saturating_sub(2);
    let bar_width = (inner / count).saturating_sub(1).clamp(1, 9);
    if inner < count {
        return;
    }

    let bars: Vec<Bar> = chart
        .bars()
        .map(|(label, minutes, tone)| {
            let text = if minutes == 0 { String::new() } else { compact_hours(minutes) };
            Bar::default()
                .value(minutes as u64)
                .label(Line::from(label.to_string()))
                .text_value(text)
                .style(Style::default().fg(tone_color(tone)))
                .value_style(Style::default().fg(Color::Black).bg(tone_color(tone)))
        })
        .collect();

    let total = format_duration(chart.series.total_minutes().min(u32::MAX as u64) as u32);
    f.render_widget(
        BarChart::default()
            .block(block.title_bottom(Line::from(format!(" Total: {total} ")).right_aligned()))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .max(chart.axis.max_minutes as u64),
        area,
    );
}


fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect(60, 60, area);

    let mut lines = vec![
        Line::from(Span::styled("Timer durations (minutes)", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];

    for (index, mode) in TimerMode::ALL.iter().enumerate() {
        let selected = index == app.settings.selected;
        let value = match (&app.settings.input, selected) {
            (Some(input), true) => format!("{input}▏"),
            _ => app.timer.settings().minutes_for(*mode).to_string(),
        };
        let marker = if selected { "▶ " } else { "  " };
        let style = if selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<14}", mode.label()), style),
            Span::styled(value, style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        span_key("↑/↓"), Span::raw(" Select  •  "),
        span_key("Enter"), Span::raw(" Edit/Apply  •  "),
        span_key("Esc"), Span::raw(" Back"),
    ]));

    f.render_widget(Paragraph::new(lines).block(frame_block(" ⚙ Settings ")), area);
}


fn frame_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(title.to_string(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
}


fn span_key(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
}


fn mode_color(mode: TimerMode) -> Color {
    match mode {
        TimerMode::Focus => Color::Rgb(239, 68, 68),
        TimerMode::ShortBreak => ACCENT,
        TimerMode::LongBreak => Color::Rgb(59, 130, 246),
    }
}


fn tone_color(tone: BarTone) -> Color {
    match tone {
        BarTone::Idle => Color::DarkGray,
        BarTone::Light => HEAT_COLORS[1],
        BarTone::Medium => HEAT_COLORS[2],
        BarTone::Strong => HEAT_COLORS[3],
        BarTone::Hot => Color::Rgb(239, 68, 68),
    }
}


fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimerConfig;
    use chrono::Datelike;
    use ratatui::backend::TestBackend;

    fn app(dir: &tempfile::TempDir) -> App {
        App::new(
            TimerConfig::default(),
            TimerMode::Focus,
            None,
            dir.path().join("missing.json"),
            Period::Week,
        )
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_timer_view_shows_clock_and_modes() {
        let dir = tempfile::tempdir().unwrap();
        let screen = draw(&app(&dir), 80, 24);

        assert!(screen.contains("25:00"));
        assert!(screen.contains("Short Break"));
        assert!(screen.contains("offline"));
    }

    #[test]
    fn test_edit_text_replaces_clock() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.timer.begin_edit();
        app.timer.edit_push('7');

        let screen = draw(&app, 80, 24);
        assert!(screen.contains("EDITING"));
        assert!(!screen.contains("25:00"));
    }

    #[test]
    fn test_dashboard_view_draws_heatmap_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.view = View::Dashboard;

        let screen = draw(&app, 120, 30);
        let heading = format!("days of focus in {} (last year)", chrono::Local::now().year());
        assert!(screen.contains(&heading));
        assert!(screen.contains("Focus minutes per day this week"));
        assert!(screen.contains("This Month"));
        assert!(screen.contains('■'));
    }

    #[test]
    fn test_tiny_terminal_draws_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        for view in [View::Timer, View::Dashboard, View::Settings] {
            app.view = view;
            let screen = draw(&app, 10, 4);
            assert!(screen.trim().is_empty());
        }
    }

    #[test]
    fn test_settings_view_lists_modes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.view = View::Settings;

        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Pomodoro"));
        assert!(screen.contains("Long Break"));
        assert!(screen.contains("15"));
    }
}
