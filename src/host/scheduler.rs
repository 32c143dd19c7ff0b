use std::time::{Duration, Instant};

/// The host's "call me before the next paint" facility.
///
/// `next_frame` blocks until the next frame slot and returns `false` once the host will not
/// schedule any more frames.
pub trait FrameScheduler: Send {
    /// Wait for the next frame slot.
    fn next_frame(&mut self) -> bool;
}

/// Grants a fixed number of frame slots back to back, or unlimited slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBudget {
    remaining: Option<u64>,
}

impl FrameBudget {
    /// Exactly `n` frames.
    pub fn frames(n: u64) -> Self {
        Self { remaining: Some(n) }
    }

    /// Never runs out.
    pub fn unbounded() -> Self {
        Self { remaining: None }
    }

    /// Slots left, `None` when unbounded.
    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }
}

impl FrameScheduler for FrameBudget {
    fn next_frame(&mut self) -> bool {
        match &mut self.remaining {
            None => true,
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
        }
    }
}

/// Paces frames to a fixed interval, like a display refresh.
#[derive(Clone, Debug)]
pub struct IntervalScheduler {
    interval: Duration,
    next_deadline: Option<Instant>,
    budget: FrameBudget,
}

impl IntervalScheduler {
    /// One slot every `interval`, forever.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: None,
            budget: FrameBudget::unbounded(),
        }
    }

    /// Sixty slots per second.
    pub fn display_rate() -> Self {
        Self::new(Duration::from_micros(16_667))
    }

    /// Stop after `n` slots.
    pub fn with_budget(mut self, n: u64) -> Self {
        self.budget = FrameBudget::frames(n);
        self
    }
}

impl FrameScheduler for IntervalScheduler {
    fn next_frame(&mut self) -> bool {
        if !self.budget.next_frame() {
            return false;
        }
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // Late frames re-anchor instead of bursting to catch up.
        self.next_deadline = Some(deadline.max(now) + self.interval);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scheduler.rs"]
mod tests;
