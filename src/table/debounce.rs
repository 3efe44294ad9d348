//! Cancellable delayed single-shot action.
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling a new value
//! replaces the pending one and restarts the quiet period, so only the last
//! value submitted within the window is ever delivered.
//!
//! The debouncer owns no thread and no timer. The host event loop passes the
//! current [`Instant`] in and calls [`Debouncer::poll`] when it wakes up (for
//! example on a periodic tick), which keeps the behavior deterministic and
//! testable.
//!
//! # Example
//!
//! ```
//! use planboard::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut debouncer = Debouncer::new(Duration::from_millis(300));
//!
//! debouncer.schedule("a", start);
//! debouncer.schedule("an", start + Duration::from_millis(100));
//!
//! assert_eq!(debouncer.poll(start + Duration::from_millis(350)), None);
//! assert_eq!(debouncer.poll(start + Duration::from_millis(400)), Some("an"));
//! assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Delivers the last scheduled value once input has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value`, cancelling any pending value and restarting the delay.
    pub fn schedule(&mut self, value: T, now: Instant) {
        if self.pending.is_some() {
            tracing::trace!("rescheduling pending debounce");
        }
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Returns the pending value if its deadline has passed.
    ///
    /// A delivered value is consumed; later polls return `None` until the next
    /// `schedule`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drops the pending value without delivering it.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("pending debounce cancelled");
        }
    }

    /// Delivers the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending value becomes deliverable.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_only_after_quiet_period() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule(1, t0);
        assert_eq!(debouncer.poll(t0 + ms(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + ms(300)), Some(1));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn each_schedule_restarts_the_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule("p", t0);
        debouncer.schedule("pl", t0 + ms(200));
        debouncer.schedule("pla", t0 + ms(400));
        assert_eq!(debouncer.poll(t0 + ms(600)), None);
        assert_eq!(debouncer.deadline(), Some(t0 + ms(700)));
        assert_eq!(debouncer.poll(t0 + ms(700)), Some("pla"));
    }

    #[test]
    fn cancel_drops_pending_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule(5, t0);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + ms(1000)), None);
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn zero_delay_fires_on_first_poll() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.schedule('x', t0);
        assert_eq!(debouncer.poll(t0), Some('x'));
    }

    #[test]
    fn flush_ignores_deadline() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule(9, t0);
        assert_eq!(debouncer.flush(), Some(9));
        assert!(!debouncer.is_pending());
    }
}
