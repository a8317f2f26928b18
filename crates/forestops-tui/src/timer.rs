//! Deadlines for the event loop. Screens expose the earliest one so the
//! loop can poll with a timeout instead of blocking on input.

use std::time::{Duration, Instant};

/// A repeating tick.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// True at most once per period. A late call does not queue up
    /// missed ticks.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.period;
        true
    }
}

/// A one-shot payload released after a delay.
#[derive(Debug, Clone)]
pub struct Delay<T> {
    due: Instant,
    payload: T,
}

impl<T> Delay<T> {
    pub fn new(after: Duration, now: Instant, payload: T) -> Self {
        Self {
            due: now + after,
            payload,
        }
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Earliest of two optional deadlines.
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_fires_once_per_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(Duration::from_secs(5), t0);
        assert!(!iv.fire(t0));
        assert!(iv.fire(t0 + Duration::from_secs(5)));
        assert!(!iv.fire(t0 + Duration::from_secs(6)));
        // a long stall yields a single tick
        assert!(iv.fire(t0 + Duration::from_secs(60)));
        assert!(!iv.fire(t0 + Duration::from_secs(61)));
    }

    #[test]
    fn delay_releases_payload() {
        let t0 = Instant::now();
        let d = Delay::new(Duration::from_millis(2000), t0, "done");
        assert!(!d.is_due(t0));
        assert!(d.is_due(t0 + Duration::from_secs(2)));
        assert_eq!(d.into_payload(), "done");
    }

    #[test]
    fn earliest_picks_min() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(1);
        assert_eq!(earliest(Some(t1), Some(t0)), Some(t0));
        assert_eq!(earliest(None, Some(t1)), Some(t1));
        assert_eq!(earliest(None, None), None);
    }
}
