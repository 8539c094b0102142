// Clocks and one-shot timers
//
// Components never sleep or spawn. A timer is a deadline the owning
// component polls against the host clock; dropping the component drops the
// deadline, so nothing can fire against a component that no longer exists.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of "now" for timers, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Monotonic wall clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A cancellable one-shot deadline
///
/// Fires at most once per `arm`. Re-arming replaces the pending deadline.
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    deadline: Option<Duration>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the timer `delay` after `now`, superseding any pending deadline
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the deadline, if pending
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// If the deadline has passed, disarm and return it
    ///
    /// Returning the deadline (not `now`) lets chained timers schedule from
    /// the instant this one was due, regardless of how coarse polling is.
    pub fn poll(&mut self, now: Duration) -> Option<Duration> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(deadline)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let mut timer = OneShot::new();
        timer.arm(ms(0), ms(100));

        assert_eq!(timer.poll(ms(99)), None);
        assert_eq!(timer.poll(ms(100)), Some(ms(100)));
        assert_eq!(timer.poll(ms(500)), None);
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timer = OneShot::new();
        timer.arm(ms(0), ms(100));
        timer.cancel();
        assert_eq!(timer.poll(ms(1000)), None);
    }

    #[test]
    fn test_rearm_supersedes_pending_deadline() {
        let mut timer = OneShot::new();
        timer.arm(ms(0), ms(100));
        timer.arm(ms(50), ms(100));

        assert_eq!(timer.poll(ms(100)), None);
        assert_eq!(timer.poll(ms(150)), Some(ms(150)));
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        clock.advance(ms(250));
        clock.advance(ms(250));
        assert_eq!(clock.now(), ms(500));
    }
}
