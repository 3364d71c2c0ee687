//! The battle countdown and the clock abstraction behind it.
//!
//! There is no background thread. The timer records a deadline when a battle
//! starts and expiry is observed only when the next input is handled, so a
//! player who runs out of time loses the round on their next answer, however
//! long they sit at the prompt.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A source of the current instant.
///
/// Production code uses [`SystemClock`]; tests drive a [`ManualClock`] to
/// make expiry deterministic.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A hand-advanced clock for tests.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and hand another to the timer.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A polled countdown with one deadline at a time.
///
/// Once the deadline passes, [`poll_expired`](Self::poll_expired) keeps
/// reporting true until [`reset`](Self::reset) or the next
/// [`start`](Self::start).
pub struct BattleTimer {
    clock: Box<dyn Clock>,
    deadline: Option<Instant>,
    expired: bool,
}

impl BattleTimer {
    /// A timer driven by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// A timer driven by the given clock.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            deadline: None,
            expired: false,
        }
    }

    /// Start a fresh countdown of `secs` seconds, clearing any prior state.
    pub fn start(&mut self, secs: u64) {
        self.deadline = Some(self.clock.now() + Duration::from_secs(secs));
        self.expired = false;
    }

    /// Stop the countdown and clear any recorded expiry.
    pub fn reset(&mut self) {
        self.deadline = None;
        self.expired = false;
    }

    /// Whether a countdown is currently running.
    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check for expiry, latching it if the deadline has passed.
    pub fn poll_expired(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            if self.clock.now() >= deadline {
                self.expired = true;
                self.deadline = None;
            }
        }
        self.expired
    }

    /// Whole seconds left, or `None` when no countdown is running.
    pub fn remaining_secs(&self) -> Option<u64> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()).as_secs())
    }
}

impl Default for BattleTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BattleTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleTimer")
            .field("deadline", &self.deadline)
            .field("expired", &self.expired)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual_timer() -> (ManualClock, BattleTimer) {
        let clock = ManualClock::new();
        let timer = BattleTimer::with_clock(Box::new(clock.clone()));
        (clock, timer)
    }

    #[test]
    fn idle_timer_never_expires() {
        let (_clock, mut timer) = manual_timer();
        assert!(!timer.is_active());
        assert!(!timer.poll_expired());
        assert_eq!(timer.remaining_secs(), None);
    }

    #[test]
    fn expires_only_after_the_deadline() {
        let (clock, mut timer) = manual_timer();
        timer.start(30);
        assert!(timer.is_active());
        assert!(!timer.poll_expired());

        clock.advance(Duration::from_secs(29));
        assert!(!timer.poll_expired());
        assert_eq!(timer.remaining_secs(), Some(1));

        clock.advance(Duration::from_secs(1));
        assert!(timer.poll_expired());
    }

    #[test]
    fn expiry_latches_until_reset() {
        let (clock, mut timer) = manual_timer();
        timer.start(10);
        clock.advance(Duration::from_secs(11));
        assert!(timer.poll_expired());
        assert!(timer.poll_expired());
        assert!(!timer.is_active());

        timer.reset();
        assert!(!timer.poll_expired());
    }

    #[test]
    fn restart_clears_a_latched_expiry() {
        let (clock, mut timer) = manual_timer();
        timer.start(5);
        clock.advance(Duration::from_secs(6));
        assert!(timer.poll_expired());

        timer.start(5);
        assert!(!timer.poll_expired());
        assert_eq!(timer.remaining_secs(), Some(5));
    }
}
