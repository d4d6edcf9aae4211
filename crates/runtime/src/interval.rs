/// Fixed-interval timer driven by frame deltas.
///
/// Stands in for a `setInterval` callback: each call to [`advance`] reports
/// how many whole intervals elapsed and carries the remainder forward.
///
/// [`advance`]: IntervalTimer::advance
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IntervalTimer {
    interval_s: f64,
    accumulated_s: f64,
    max_catch_up: u32,
}

/// Shortest interval accepted; smaller values are clamped up.
pub const MIN_INTERVAL_S: f64 = 1e-3;

impl IntervalTimer {
    pub fn new(interval_s: f64, max_catch_up: u32) -> Self {
        let interval_s = if interval_s.is_finite() {
            interval_s.max(MIN_INTERVAL_S)
        } else {
            MIN_INTERVAL_S
        };
        Self {
            interval_s,
            accumulated_s: 0.0,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn interval_s(&self) -> f64 {
        self.interval_s
    }

    /// Time accumulated toward the next tick.
    pub fn pending_s(&self) -> f64 {
        self.accumulated_s
    }

    /// Add `dt_s` and return the number of ticks that fired.
    ///
    /// At most `max_catch_up` ticks fire per call; time beyond that is
    /// dropped rather than replayed on later frames.
    pub fn advance(&mut self, dt_s: f64) -> u32 {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return 0;
        }

        self.accumulated_s += dt_s;
        let whole = (self.accumulated_s / self.interval_s).floor();
        self.accumulated_s = (self.accumulated_s - whole * self.interval_s).max(0.0);

        if whole >= self.max_catch_up as f64 {
            self.max_catch_up
        } else {
            whole as u32
        }
    }
}
