//! Time units and deadlines.

use std::{
    fmt,
    time::{Duration, Instant},
};

/// Extension methods for initializing [`Duration`] values.
pub trait TimeUnits {
    /// Milliseconds.
    fn ms(self) -> Duration;
    /// Seconds.
    fn secs(self) -> Duration;
}
impl TimeUnits for u64 {
    fn ms(self) -> Duration {
        Duration::from_millis(self)
    }

    fn secs(self) -> Duration {
        Duration::from_secs(self)
    }
}

/// Represents the instant a time window expires.
///
/// Windows can be specified as an [`Instant`] in the future or as a [`Duration`] from now, both
/// types convert to this `struct`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Deadline(pub Instant);
impl Deadline {
    /// New deadline from now + `dur`.
    pub fn timeout(dur: Duration) -> Self {
        Deadline(Instant::now() + dur)
    }

    /// New deadline from `start` + `dur`.
    pub fn after(start: Instant, dur: Duration) -> Self {
        Deadline(start + dur)
    }

    /// Returns `true` if the deadline was reached.
    pub fn has_elapsed(self) -> bool {
        self.has_elapsed_by(Instant::now())
    }

    /// Returns `true` if the deadline was already reached at `instant`.
    pub fn has_elapsed_by(self, instant: Instant) -> bool {
        self.0 <= instant
    }
}
impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dur = self.0.saturating_duration_since(Instant::now());
        if dur == Duration::ZERO {
            write!(f, "elapsed")
        } else {
            write!(f, "{dur:?} left")
        }
    }
}
impl fmt::Debug for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deadline({self})")
    }
}
impl From<Instant> for Deadline {
    fn from(deadline: Instant) -> Self {
        Deadline(deadline)
    }
}
impl From<Duration> for Deadline {
    fn from(timeout: Duration) -> Self {
        Deadline::timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(1500.ms(), Duration::from_millis(1500));
        assert_eq!(2.secs(), Duration::from_millis(2000));
    }

    #[test]
    fn elapsed_at_exact_instant() {
        let start = Instant::now();
        let deadline = Deadline::after(start, 2.secs());

        assert!(!deadline.has_elapsed_by(start));
        assert!(!deadline.has_elapsed_by(start + 1999.ms()));
        assert!(deadline.has_elapsed_by(start + 2.secs()));
        assert!(deadline.has_elapsed_by(start + 3.secs()));
    }

    #[test]
    fn timeout_is_in_the_future() {
        assert!(!Deadline::timeout(60.secs()).has_elapsed());
        assert!(Deadline::timeout(Duration::ZERO).has_elapsed());
    }
}
