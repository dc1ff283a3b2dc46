//! Clock source and delay primitives.
//!
//! Every animation in this crate is driven by plain millisecond timestamps.
//! [`FrameClock`] produces them from the wall clock once per frame, while
//! [`Ticker`] and [`Stages`] turn them into "wait N milliseconds" steps.

use std::time::{Duration, Instant};

/// Monotonic frame clock measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start a new clock at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Milliseconds elapsed since the clock started.
    pub fn now_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}

/// Periodic delay that fires once per period.
///
/// Each period is measured from the poll that fired the previous one, the
/// way a loop of sleeps behaves: a stalled frame delays later ticks instead
/// of replaying the missed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    period_ms: u64,
    next_due_ms: u64,
}

impl Ticker {
    /// Create a ticker whose first period starts at `start_ms`.
    pub fn new(period_ms: u64, start_ms: u64) -> Self {
        Self {
            period_ms,
            next_due_ms: start_ms.saturating_add(period_ms),
        }
    }

    /// Returns true when the current period has elapsed at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = now_ms.saturating_add(self.period_ms);
        true
    }
}

/// A fixed sequence of delays run one after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stages {
    delays_ms: Vec<u64>,
    completed: usize,
    next_due_ms: Option<u64>,
}

impl Stages {
    /// Schedule `delays_ms` back to back, the first starting at `start_ms`.
    pub fn new(delays_ms: &[u64], start_ms: u64) -> Self {
        Self {
            delays_ms: delays_ms.to_vec(),
            completed: 0,
            next_due_ms: delays_ms.first().map(|d| start_ms.saturating_add(*d)),
        }
    }

    /// Advance to `now_ms`, completing at most one stage.
    ///
    /// Returns the number of completed stages.
    pub fn update(&mut self, now_ms: u64) -> usize {
        if let Some(due) = self.next_due_ms
            && now_ms >= due
        {
            self.completed += 1;
            self.next_due_ms = self
                .delays_ms
                .get(self.completed)
                .map(|d| now_ms.saturating_add(*d));
        }
        self.completed
    }

    /// Whether every stage has completed.
    pub fn is_done(&self) -> bool {
        self.completed >= self.delays_ms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_fires_once_per_period() {
        let mut ticker = Ticker::new(1_000, 0);
        assert!(!ticker.poll(999));
        assert!(ticker.poll(1_000));
        assert!(!ticker.poll(1_000));
        assert!(!ticker.poll(1_999));
        assert!(ticker.poll(2_000));
    }

    #[test]
    fn test_ticker_does_not_replay_missed_ticks() {
        let mut ticker = Ticker::new(400, 0);
        assert!(ticker.poll(2_000));
        assert!(!ticker.poll(2_100));
        assert!(!ticker.poll(2_399));
        assert!(ticker.poll(2_400));
    }

    #[test]
    fn test_stages_run_in_order() {
        let mut stages = Stages::new(&[700, 500, 2_500], 0);
        assert_eq!(stages.update(699), 0);
        assert_eq!(stages.update(700), 1);
        assert_eq!(stages.update(1_199), 1);
        assert_eq!(stages.update(1_200), 2);
        assert!(!stages.is_done());
        assert_eq!(stages.update(3_700), 3);
        assert!(stages.is_done());
        assert_eq!(stages.update(10_000), 3);
    }

    #[test]
    fn test_stages_complete_one_per_update() {
        let mut stages = Stages::new(&[100, 100], 0);
        assert_eq!(stages.update(5_000), 1);
        assert_eq!(stages.update(5_050), 1);
        assert_eq!(stages.update(5_100), 2);
    }

    #[test]
    fn test_frame_clock_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
