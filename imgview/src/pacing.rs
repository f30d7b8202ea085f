//! Fixed-rate frame pacing.
//!
//! Each frame records its start, does its work, then sleeps whatever is left of the
//! frame period. A frame that overruns simply starts the next one late: there is no
//! catch-up and no frame is ever skipped.

use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            frame_start: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Mark the start of a frame.
    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        self.frame_start = now;
    }

    /// Time left in the current frame, zero once the period has elapsed.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.period
            .saturating_sub(now.saturating_duration_since(self.frame_start))
    }

    /// Sleep until the end of the current frame period.
    pub fn sleep_remaining(&self) {
        let remaining = self.remaining_at(Instant::now());
        if remaining.is_zero() {
            trace!("Frame overran its {:?} period", self.period);
            return;
        }
        std::thread::sleep(remaining);
    }
}
