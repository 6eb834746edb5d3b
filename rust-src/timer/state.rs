//! Pomodoro state machine.
//!
//! Transitions are plain method calls that mutate the controller and return
//! the [`Effect`]s the runtime must carry out (network calls, cue, status
//! line, redirect). The one-second tick is owned by an injected [`Scheduler`].

use std::time::Duration;

use crate::config::{TimerConfig, REDIRECT_DELAY, TICK_INTERVAL};
use crate::models::{SessionId, TimerMode};

use super::edit::{format_clock, EditBuffer};
use super::progress::ProgressRing;
use super::scheduler::Scheduler;


/// Lifecycle of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
}


/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
}


/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the server to open a focus session for run `run`.
    StartSession { run: u64, mode: TimerMode },
    /// Report a finished focus session.
    EndSession { session_id: SessionId, duration_minutes: u32 },
    PlayCue,
    ShowStatus { text: String, kind: StatusKind },
    ClearStatus,
    /// Switch to the dashboard after a delay.
    Redirect { after: Duration },
}


impl Effect {
    fn status(text: impl Into<String>, kind: StatusKind) -> Self {
        Effect::ShowStatus { text: text.into(), kind }
    }
}


/// Countdown controller for the three timer modes.
#[derive(Debug)]
pub struct TimerController<S: Scheduler> {
    settings: TimerConfig,
    mode: TimerMode,
    remaining_secs: u32,
    total_secs: u32,
    run_state: RunState,
    edit: Option<EditBuffer>,
    session_id: Option<SessionId>,
    pending_start: Option<u64>,
    run_id: u64,
    scheduler: S,
}


impl<S: Scheduler> TimerController<S> {
    pub fn new(settings: TimerConfig, mode: TimerMode, scheduler: S) -> Self {
        let total_secs = settings.minutes_for(mode) * 60;
        Self {
            settings,
            mode,
            remaining_secs: total_secs,
            total_secs,
            run_state: RunState::Idle,
            edit: None,
            session_id: None,
            pending_start: None,
            run_id: 0,
            scheduler,
        }
    }

    // --- transitions -------------------------------------------------------

    /// Begin or resume the countdown.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.is_running() {
            return Vec::new();
        }
        if self.edit.is_some() {
            self.commit_edit();
        }

        self.run_state = RunState::Running;

        let mut effects = Vec::new();
        if self.mode.is_focus() && self.session_id.is_none() && self.pending_start.is_none() {
            self.pending_start = Some(self.run_id);
            effects.push(Effect::StartSession {
                run: self.run_id,
                mode: self.mode,
            });
        }

        self.scheduler.start(TICK_INTERVAL);
        tracing::debug!(mode = %self.mode, remaining = self.remaining_secs, "Timer started");
        effects
    }

    /// Stop ticking, keeping the remaining time.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        self.run_state = RunState::Paused;
        self.scheduler.cancel();
    }

    /// Return to idle with the configured duration for the current mode.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.restore_idle();
        vec![Effect::ClearStatus]
    }

    /// One scheduled decrement.
    pub fn tick(&mut self) -> Vec<Effect> {
        if !self.is_running() {
            return Vec::new();
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.complete()
        } else {
            Vec::new()
        }
    }

    /// Pause, drop any edit and load the new mode's duration.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.pause();
        self.mode = mode;
        self.restore_idle();
    }

    /// Apply a settings field; invalid or zero text falls back to the mode default.
    pub fn update_setting(&mut self, mode: TimerMode, text: &str) -> u32 {
        let minutes = text
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| *m > 0)
            .unwrap_or_else(|| mode.default_minutes());

        self.settings.set_minutes(mode, minutes);
        if mode == self.mode && !self.is_running() {
            self.load_configured();
        }
        minutes
    }

    // --- manual edit -------------------------------------------------------

    /// Open the display for editing. Refused while running or already editing.
    pub fn begin_edit(&mut self) -> bool {
        if self.is_running() || self.edit.is_some() {
            return false;
        }
        self.edit = Some(EditBuffer::new(self.remaining_secs));
        true
    }

    pub fn edit_push(&mut self, c: char) {
        if let Some(edit) = self.edit.as_mut() {
            edit.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(edit) = self.edit.as_mut() {
            edit.backspace();
        }
    }

    /// Apply the typed time when it parses; otherwise keep the previous value.
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.edit.take() else { return };

        match edit.parse() {
            Some(secs) => {
                self.remaining_secs = secs;
                self.total_secs = secs;
            }
            None => tracing::debug!(text = edit.text(), "Discarding malformed time entry"),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    // --- server acknowledgements ---------------------------------------------

    /// A start request for `run` succeeded. Stale runs are ignored.
    pub fn on_session_started(&mut self, run: u64, session_id: SessionId) -> Vec<Effect> {
        if self.pending_start != Some(run) {
            tracing::debug!(run, session = %session_id, "Ignoring stale session start");
            return Vec::new();
        }

        self.pending_start = None;
        self.session_id = Some(session_id);
        vec![Effect::status("Session started", StatusKind::Success)]
    }

    /// A start request for `run` failed; the next start may retry.
    pub fn on_session_start_failed(&mut self, run: u64) {
        if self.pending_start == Some(run) {
            self.pending_start = None;
        }
    }

    /// The server acknowledged a finished session.
    pub fn on_session_ended(&mut self, duration_minutes: u32) -> Vec<Effect> {
        vec![
            Effect::status(
                format!("Session completed! {duration_minutes} minutes focused."),
                StatusKind::Info,
            ),
            Effect::Redirect { after: REDIRECT_DELAY },
        ]
    }

    // --- accessors -------------------------------------------------------------

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn edit_text(&self) -> Option<&str> {
        self.edit.as_ref().map(EditBuffer::text)
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn settings(&self) -> &TimerConfig {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Remaining time as `mm:ss`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn progress(&self) -> ProgressRing {
        ProgressRing::new(self.remaining_secs, self.total_secs)
    }

    // --- internals -------------------------------------------------------------

    fn complete(&mut self) -> Vec<Effect> {
        self.pause();

        let mut effects = vec![Effect::PlayCue];
        match (self.mode.is_focus(), self.session_id.take()) {
            (true, Some(session_id)) => effects.push(Effect::EndSession {
                session_id,
                duration_minutes: self.run_minutes(),
            }),
            (true, None) => effects.push(Effect::status("Focus session completed!", StatusKind::Success)),
            (false, _) => effects.push(Effect::status("Break completed!", StatusKind::Success)),
        }

        tracing::info!(mode = %self.mode, seconds = self.total_secs, "Timer completed");
        self.restore_idle();
        effects
    }

    /// Length of the current run in whole minutes.
    fn run_minutes(&self) -> u32 {
        (self.total_secs + 30) / 60
    }

    fn restore_idle(&mut self) {
        self.scheduler.cancel();
        self.run_state = RunState::Idle;
        self.edit = None;
        self.session_id = None;
        self.pending_start = None;
        self.run_id += 1;
        self.load_configured();
    }

    fn load_configured(&mut self) {
        self.total_secs = self.settings.minutes_for(self.mode) * 60;
        self.remaining_secs = self.total_secs;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::scheduler::ManualScheduler;

    fn controller() -> TimerController<ManualScheduler> {
        TimerController::new(TimerConfig::default(), TimerMode::Focus, ManualScheduler::default())
    }

    fn run_to_end(timer: &mut TimerController<ManualScheduler>) -> Vec<Effect> {
        let mut effects = Vec::new();
        while timer.is_running() {
            effects.extend(timer.tick());
        }
        effects
    }

    fn assert_invariants(timer: &TimerController<ManualScheduler>) {
        assert!(timer.remaining_secs() <= timer.total_secs());
        assert_eq!(timer.scheduler().is_active(), timer.is_running());
    }

    #[test]
    fn test_initial_state() {
        let timer = controller();
        assert_eq!(timer.run_state(), RunState::Idle);
        assert_eq!(timer.remaining_secs(), 1500);
        assert_eq!(timer.clock(), "25:00");
        assert_invariants(&timer);
    }

    #[test]
    fn test_huge_configured_minutes_are_capped() {
        let settings = TimerConfig { pomodoro_minutes: 100_000_000, ..TimerConfig::default() };
        let timer = TimerController::new(settings, TimerMode::Focus, ManualScheduler::default());
        assert_eq!(timer.total_secs(), 999 * 60);
        assert_eq!(timer.remaining_secs(), 999 * 60);
    }

    #[test]
    fn test_focus_start_requests_session_once() {
        let mut timer = controller();

        let effects = timer.start();
        assert_eq!(effects, vec![Effect::StartSession { run: 0, mode: TimerMode::Focus }]);
        assert!(timer.scheduler().active);

        // Already running: no second request or schedule.
        assert!(timer.start().is_empty());
        assert_eq!(timer.scheduler().starts, 1);

        // Pause/resume while the request is outstanding does not re-request.
        timer.pause();
        assert!(timer.start().is_empty());
        assert_invariants(&timer);
    }

    #[test]
    fn test_break_start_does_not_contact_server() {
        let mut timer = controller();
        timer.switch_mode(TimerMode::ShortBreak);
        assert!(timer.start().is_empty());
        assert_eq!(timer.remaining_secs(), 300);
    }

    #[test]
    fn test_pause_preserves_remaining() {
        let mut timer = controller();
        timer.start();
        timer.tick();
        timer.tick();
        timer.pause();

        assert_eq!(timer.run_state(), RunState::Paused);
        assert_eq!(timer.remaining_secs(), 1498);
        assert!(!timer.scheduler().active);
        assert!(timer.tick().is_empty());
        assert_eq!(timer.remaining_secs(), 1498);
    }

    #[test]
    fn test_reset_restores_configured_duration_for_every_mode() {
        for mode in TimerMode::ALL {
            let mut timer = controller();
            timer.switch_mode(mode);
            timer.start();
            timer.tick();
            if timer.begin_edit() {
                timer.edit_push('5');
                timer.commit_edit();
            }

            let effects = timer.reset();

            assert_eq!(effects, vec![Effect::ClearStatus]);
            assert_eq!(timer.run_state(), RunState::Idle);
            assert_eq!(timer.remaining_secs(), timer.settings().minutes_for(mode) * 60);
            assert!(timer.session_id().is_none());
            assert_invariants(&timer);
        }
    }

    #[test]
    fn test_focus_completion_posts_whole_minutes() {
        let mut timer = controller();
        timer.start();
        timer.on_session_started(0, SessionId::new("17"));
        assert_eq!(timer.session_id().map(SessionId::as_str), Some("17"));

        let effects = run_to_end(&mut timer);

        assert_eq!(
            effects,
            vec![
                Effect::PlayCue,
                Effect::EndSession {
                    session_id: SessionId::new("17"),
                    duration_minutes: 25,
                },
            ]
        );
        assert_eq!(timer.run_state(), RunState::Idle);
        assert_eq!(timer.remaining_secs(), 1500);
        assert!(timer.session_id().is_none());
        assert_invariants(&timer);
    }

    #[test]
    fn test_focus_completion_without_session_stays_local() {
        let mut timer = controller();
        timer.start();
        timer.on_session_start_failed(0);

        let effects = run_to_end(&mut timer);
        assert_eq!(effects[0], Effect::PlayCue);
        assert!(!effects.iter().any(|e| matches!(e, Effect::EndSession { .. })));
    }

    #[test]
    fn test_break_completion_shows_message() {
        let mut timer = controller();
        timer.switch_mode(TimerMode::ShortBreak);
        timer.start();

        let effects = run_to_end(&mut timer);
        assert_eq!(
            effects,
            vec![
                Effect::PlayCue,
                Effect::ShowStatus {
                    text: "Break completed!".into(),
                    kind: StatusKind::Success,
                },
            ]
        );
    }

    #[test]
    fn test_session_end_ack_redirects() {
        let mut timer = controller();
        let effects = timer.on_session_ended(25);
        assert_eq!(
            effects[0],
            Effect::ShowStatus {
                text: "Session completed! 25 minutes focused.".into(),
                kind: StatusKind::Info,
            }
        );
        assert_eq!(effects[1], Effect::Redirect { after: REDIRECT_DELAY });
    }

    #[test]
    fn test_switch_while_running_pauses_first() {
        let mut timer = controller();
        timer.start();
        timer.tick();

        timer.switch_mode(TimerMode::LongBreak);

        assert!(!timer.scheduler().active);
        assert!(timer.scheduler().cancels >= 1);
        assert_eq!(timer.run_state(), RunState::Idle);
        assert_eq!(timer.remaining_secs(), 900);
        assert!(timer.tick().is_empty());
        assert_eq!(timer.remaining_secs(), 900);
        assert_invariants(&timer);
    }

    #[test]
    fn test_stale_session_ack_is_discarded() {
        let mut timer = controller();
        timer.start();
        timer.reset();

        assert!(timer.on_session_started(0, SessionId::new("old")).is_empty());
        assert!(timer.session_id().is_none());

        // Ack for the current run is accepted.
        timer.start();
        let effects = timer.on_session_started(1, SessionId::new("new"));
        assert_eq!(effects.len(), 1);
        assert_eq!(timer.session_id().map(SessionId::as_str), Some("new"));
    }

    #[test]
    fn test_switching_mode_drops_session() {
        let mut timer = controller();
        timer.start();
        timer.on_session_started(0, SessionId::new("9"));
        timer.switch_mode(TimerMode::ShortBreak);
        assert!(timer.session_id().is_none());
    }

    #[test]
    fn test_edit_commit_ninety_clamps_to_59_seconds() {
        let mut timer = controller();
        assert!(timer.begin_edit());
        timer.edit_push('9');
        timer.edit_push('0');
        timer.commit_edit();

        assert!(!timer.is_editing());
        assert_eq!(timer.remaining_secs(), 59);
        assert_eq!(timer.total_secs(), 59);
    }

    #[test]
    fn test_malformed_edit_keeps_previous_value() {
        let mut timer = controller();
        timer.begin_edit();
        timer.edit_push(':');
        timer.commit_edit();
        assert_eq!(timer.remaining_secs(), 1500);

        timer.begin_edit();
        timer.edit_push('1');
        timer.cancel_edit();
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn test_edit_refused_while_running() {
        let mut timer = controller();
        timer.start();
        assert!(!timer.begin_edit());
        timer.pause();
        assert!(timer.begin_edit());
    }

    #[test]
    fn test_start_commits_pending_edit() {
        let mut timer = controller();
        timer.begin_edit();
        for c in "0130".chars() {
            timer.edit_push(c);
        }
        timer.start();

        assert!(!timer.is_editing());
        assert_eq!(timer.total_secs(), 90);
        assert!(timer.is_running());
    }

    #[test]
    fn test_switch_mode_cancels_edit() {
        let mut timer = controller();
        timer.begin_edit();
        timer.edit_push('5');
        timer.switch_mode(TimerMode::ShortBreak);
        assert!(!timer.is_editing());
        assert_eq!(timer.remaining_secs(), 300);
    }

    #[test]
    fn test_update_setting_applies_to_idle_current_mode() {
        let mut timer = controller();
        assert_eq!(timer.update_setting(TimerMode::Focus, "50"), 50);
        assert_eq!(timer.remaining_secs(), 3000);

        assert_eq!(timer.update_setting(TimerMode::Focus, "abc"), 25);
        assert_eq!(timer.update_setting(TimerMode::Focus, "0"), 25);
        assert_eq!(timer.remaining_secs(), 1500);

        // Other modes are stored without touching the display.
        timer.update_setting(TimerMode::ShortBreak, "7");
        assert_eq!(timer.remaining_secs(), 1500);
        timer.switch_mode(TimerMode::ShortBreak);
        assert_eq!(timer.remaining_secs(), 420);
    }

    #[test]
    fn test_update_setting_waits_while_running() {
        let mut timer = controller();
        timer.start();
        timer.tick();
        timer.update_setting(TimerMode::Focus, "30");
        assert_eq!(timer.remaining_secs(), 1499);

        timer.reset();
        assert_eq!(timer.remaining_secs(), 1800);
    }
}
