//! Pomodoro countdown: state machine, manual entry, tick schedule and progress ring.

mod edit;
mod progress;
mod scheduler;
mod state;

#[allow(unused_imports)]
pub use edit::{format_clock, parse_time_input, EditBuffer};
pub use progress::ProgressRing;
pub use scheduler::{IntervalScheduler, Scheduler};
pub use state::{Effect, RunState, StatusKind, TimerController};
