//! Deadline timers polled from the event loop
//!
//! Nothing here sleeps or spawns. The loop asks for the earliest deadline,
//! waits until then, and polls with the current time.

use std::time::{Duration, Instant};

/// Fires every `interval` until cancelled
#[derive(Debug, Clone, Default)]
pub struct RepeatingTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) with the first firing one `interval` after `now`
    pub fn start(&mut self, now: Instant, interval: Duration) {
        self.interval = interval;
        self.next_due = Some(now + interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Returns true when a firing is due; fires at most once per call
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.interval;
        if next <= now {
            // Fell behind (window hidden, machine asleep): don't burst
            next = now + self.interval;
        }
        self.next_due = Some(next);
        true
    }
}

/// Fires once after being armed
#[derive(Debug, Clone, Default)]
pub struct OneShotTimer {
    due: Option<Instant>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) to fire `after` from `now`
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.due = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_repeating_fires_on_each_interval() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        timer.start(t0, 2 * SEC);

        assert!(!timer.poll(t0 + SEC));
        assert!(timer.poll(t0 + 2 * SEC));
        assert!(!timer.poll(t0 + 3 * SEC));
        assert!(timer.poll(t0 + 4 * SEC));
        assert_eq!(timer.deadline(), Some(t0 + 6 * SEC));
    }

    #[test]
    fn test_repeating_restart_replaces_schedule() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        timer.start(t0, 5 * SEC);
        timer.start(t0 + SEC, 2 * SEC);

        assert_eq!(timer.deadline(), Some(t0 + 3 * SEC));
        assert_eq!(timer.interval(), 2 * SEC);
    }

    #[test]
    fn test_repeating_does_not_burst_after_stall() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        timer.start(t0, SEC);

        assert!(timer.poll(t0 + 10 * SEC));
        assert!(!timer.poll(t0 + 10 * SEC));
        assert_eq!(timer.deadline(), Some(t0 + 11 * SEC));
    }

    #[test]
    fn test_cancelled_never_fires() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        timer.start(t0, SEC);
        timer.cancel();

        assert!(!timer.is_active());
        assert!(!timer.poll(t0 + 5 * SEC));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let t0 = Instant::now();
        let mut timer = OneShotTimer::new();
        timer.arm(t0, 3 * SEC);

        assert!(!timer.poll(t0 + 2 * SEC));
        assert!(timer.poll(t0 + 3 * SEC));
        assert!(!timer.poll(t0 + 4 * SEC));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_one_shot_rearm_pushes_deadline() {
        let t0 = Instant::now();
        let mut timer = OneShotTimer::new();
        timer.arm(t0, 3 * SEC);
        timer.arm(t0 + 2 * SEC, 3 * SEC);

        assert!(!timer.poll(t0 + 3 * SEC));
        assert!(timer.poll(t0 + 5 * SEC));
    }
}
