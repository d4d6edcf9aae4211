use foundation::time::Time;

/// Frame metadata.
///
/// Frames are driven by the display refresh, so `dt_s` varies from frame to
/// frame; `time` accumulates the deltas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time since the previous frame (seconds).
    pub dt_s: f64,
    /// Engine time at the end of the frame (seconds).
    pub time: Time,
}

impl Frame {
    /// Fixed-timestep frame, used for replays and tests.
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// Advance by a measured delta. Negative or non-finite deltas count as 0.
    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time.advanced_by(dt_s),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}
