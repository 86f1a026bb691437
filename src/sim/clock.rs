// clock.rs - Fixed-timestep driver
//
// The browser hands us wall-clock deltas of whatever the display
// manages. FrameClock turns them into whole simulation ticks so the
// cycle runs at the same pace on 60 Hz and 144 Hz screens.

/// One tick at 60 Hz.
pub const STEP_MS: f64 = 1000.0 / 60.0;

/// Ticks a single call may catch up on; a stalled tab does not replay
/// minutes of simulation when it wakes.
pub const MAX_CATCH_UP: u32 = 4;

#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    max_steps: u32,
    pending_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(STEP_MS, MAX_CATCH_UP)
    }
}

impl FrameClock {
    pub fn new(step_ms: f64, max_steps: u32) -> Self {
        Self { step_ms: step_ms.max(f64::EPSILON), max_steps, pending_ms: 0.0 }
    }

    /// Feed elapsed milliseconds, get the number of ticks to run.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.pending_ms += dt_ms;
        }
        let due = (self.pending_ms / self.step_ms).floor();
        if due >= self.max_steps as f64 {
            // Too far behind; drop the backlog.
            self.pending_ms = 0.0;
            return self.max_steps;
        }
        self.pending_ms -= due * self.step_ms;
        due as u32
    }

    pub fn reset(&mut self) {
        self.pending_ms = 0.0;
    }
}
