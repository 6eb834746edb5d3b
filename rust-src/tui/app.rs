//! Interactive timer application state.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;

use crate::client::{SessionDispatcher, SessionEvent, SessionRequest};
use crate::config::{TimerConfig, STATUS_DURATION};
use crate::models::{DashboardData, Period, TimerMode};
use crate::timer::{Effect, IntervalScheduler, StatusKind, TimerController};
use crate::visualization::DashboardState;


/// Screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Timer,
    Dashboard,
    Settings,
}


/// Transient message under the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
    pub expires: Instant,
}


/// Settings screen cursor and in-progress entry.
#[derive(Debug, Default)]
pub struct SettingsForm {
    pub selected: usize,
    pub input: Option<String>,
}


impl SettingsForm {
    pub fn mode(&self) -> TimerMode {
        TimerMode::ALL[self.selected % TimerMode::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % TimerMode::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + TimerMode::ALL.len() - 1) % TimerMode::ALL.len();
    }
}


pub struct App {
    pub timer: TimerController<IntervalScheduler>,
    pub dashboard: DashboardState,
    pub settings: SettingsForm,
    pub view: View,
    pub status: Option<Status>,
    pub should_quit: bool,
    dispatcher: Option<SessionDispatcher>,
    data_path: PathBuf,
    redirect_at: Option<Instant>,
    pending_cues: u32,
}


impl App {
    pub fn new(
        settings: TimerConfig,
        mode: TimerMode,
        dispatcher: Option<SessionDispatcher>,
        data_path: PathBuf,
        period: Period,
    ) -> Self {
        let data = DashboardData::load_or_empty(&data_path);
        let dashboard = DashboardState::new(data, Local::now().date_naive(), period);

        Self {
            timer: TimerController::new(settings, mode, IntervalScheduler::new()),
            dashboard,
            settings: SettingsForm::default(),
            view: View::Timer,
            status: None,
            should_quit: false,
            dispatcher,
            data_path,
            redirect_at: None,
            pending_cues: 0,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.dispatcher.is_none()
    }

    /// Advance the clock, collect server outcomes and expire timed state.
    pub fn update(&mut self, now: Instant) {
        let due = self.timer.scheduler_mut().due_ticks(now);
        for _ in 0..due {
            let effects = self.timer.tick();
            self.apply(effects, now);
        }

        let events = self.dispatcher.as_ref().map(SessionDispatcher::drain).unwrap_or_default();
        for event in events {
            self.on_session_event(event, now);
        }

        if self.status.as_ref().is_some_and(|s| s.expires <= now) {
            self.status = None;
        }

        if self.redirect_at.is_some_and(|at| at <= now) {
            self.redirect_at = None;
            self.open_dashboard();
        }
    }

    /// Carry out the work a timer transition asked for.
    pub fn apply(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::StartSession { run, mode } => match &self.dispatcher {
                    Some(dispatcher) => dispatcher.submit(SessionRequest::Start { run, mode }),
                    None => self.timer.on_session_start_failed(run),
                },
                Effect::EndSession { session_id, duration_minutes } => {
                    if let Some(dispatcher) = &self.dispatcher {
                        dispatcher.submit(SessionRequest::End { session_id, duration_minutes });
                    }
                }
                Effect::PlayCue => self.pending_cues += 1,
                Effect::ShowStatus { text, kind } => {
                    self.status = Some(Status {
                        text,
                        kind,
                        expires: now + STATUS_DURATION,
                    });
                }
                Effect::ClearStatus => self.status = None,
                Effect::Redirect { after } => self.redirect_at = Some(now + after),
            }
        }
    }

    fn on_session_event(&mut self, event: SessionEvent, now: Instant) {
        match event {
            SessionEvent::Started { run, session_id } => {
                let effects = self.timer.on_session_started(run, session_id);
                self.apply(effects, now);
            }
            SessionEvent::StartFailed { run } => self.timer.on_session_start_failed(run),
            SessionEvent::Ended { duration_minutes } => {
                let effects = self.timer.on_session_ended(duration_minutes);
                self.apply(effects, now);
            }
            SessionEvent::EndFailed => {}
        }
    }

    /// Number of audible cues requested since the last call.
    pub fn take_cues(&mut self) -> u32 {
        std::mem::take(&mut self.pending_cues)
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect_at.is_some()
    }

    /// Re-read the data file and show the dashboard.
    pub fn open_dashboard(&mut self) {
        let data = DashboardData::load_or_empty(&self.data_path);
        self.dashboard.reload(data, Local::now().date_naive());
        self.view = View::Dashboard;
    }

    pub fn show_status(&mut self, text: impl Into<String>, kind: StatusKind, now: Instant) {
        self.apply(vec![Effect::ShowStatus { text: text.into(), kind }], now);
    }

    /// Apply the settings entry for the selected mode.
    pub fn commit_setting(&mut self, now: Instant) {
        let Some(text) = self.settings.input.take() else { return };
        let mode = self.settings.mode();
        let minutes = self.timer.update_setting(mode, &text);
        self.show_status(format!("{} set to {minutes} min", mode.label()), StatusKind::Success, now);
    }
}
