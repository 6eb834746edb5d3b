//! Repeating tick schedule driving the countdown.

use std::time::{Duration, Instant};


/// Owner of the single repeating tick.
///
/// Starting an already active schedule replaces it, so at most one is live.
pub trait Scheduler {
    fn start(&mut self, period: Duration);
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}


/// Wall-clock schedule polled from the UI loop.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    period: Option<Duration>,
    next_due: Option<Instant>,
}


impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks that have come due by `now`, advancing the schedule.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let (Some(period), Some(mut due)) = (self.period, self.next_due) else {
            return 0;
        };

        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += period;
        }
        self.next_due = Some(due);
        ticks
    }

    /// Time left until the next tick, if one is scheduled.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    fn start_at(&mut self, period: Duration, now: Instant) {
        self.period = Some(period);
        self.next_due = Some(now + period);
    }
}


impl Scheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        self.start_at(period, Instant::now());
    }

    fn cancel(&mut self) {
        self.period = None;
        self.next_due = None;
    }

    fn is_active(&self) -> bool {
        self.next_due.is_some()
    }
}


/// Scheduler that only records calls; ticks are delivered by hand.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub active: bool,
    pub starts: u32,
    pub cancels: u32,
}


#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn start(&mut self, _period: Duration) {
        self.active = true;
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.active {
            self.cancels += 1;
        }
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
