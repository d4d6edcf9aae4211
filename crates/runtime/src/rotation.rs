use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Orientation of the globe group (radians).
///
/// `yaw` turns the globe about its vertical axis, `pitch` tilts it toward or
/// away from the camera.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationState {
    pub yaw: f64,
    pub pitch: f64,
}

impl RotationState {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// One damping tick: normalize pitch, then decay it toward zero.
    pub fn damp_pitch(&mut self, damping: &PitchDamping) {
        self.pitch = damping.apply(normalize_pitch(self.pitch));
    }
}

/// Geometric pitch decay applied on every damping tick.
///
/// Pitch above `upper_threshold` or below `lower_threshold` is multiplied by
/// `factor`; anything in between snaps to exactly zero. The default bounds
/// are asymmetric (`0.003` and `-0.03`).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchDamping {
    pub factor: f64,
    pub upper_threshold: f64,
    pub lower_threshold: f64,
}

impl Default for PitchDamping {
    fn default() -> Self {
        Self {
            factor: 0.99,
            upper_threshold: 0.003,
            lower_threshold: -0.03,
        }
    }
}

impl PitchDamping {
    /// Same bounds on both sides of zero.
    pub fn symmetric(factor: f64, threshold: f64) -> Self {
        let threshold = threshold.abs();
        Self {
            factor,
            upper_threshold: threshold,
            lower_threshold: -threshold,
        }
    }

    pub fn apply(&self, pitch: f64) -> f64 {
        if pitch > self.upper_threshold || pitch < self.lower_threshold {
            pitch * self.factor
        } else {
            0.0
        }
    }
}

/// Fold pitch into `[-π, π]` by half-turn steps.
///
/// Non-finite input resets to zero.
pub fn normalize_pitch(pitch: f64) -> f64 {
    if !pitch.is_finite() {
        return 0.0;
    }
    let mut p = pitch;
    while p < -PI {
        p += PI;
    }
    while p > PI {
        p -= PI;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::{PitchDamping, RotationState, normalize_pitch};
    use std::f64::consts::PI;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn pitch_decays_geometrically() {
        let damping = PitchDamping::default();
        let mut rot = RotationState::new(0.0, 1.0);
        for k in 1..=100 {
            rot.damp_pitch(&damping);
            assert_close(rot.pitch, 0.99f64.powi(k), 1e-12);
        }
    }

    #[test]
    fn positive_pitch_snaps_below_upper_threshold() {
        let damping = PitchDamping::default();
        assert_eq!(damping.apply(0.003), 0.0);
        assert_eq!(damping.apply(0.0029), 0.0);
        assert_close(damping.apply(0.004), 0.00396, 1e-12);
    }

    #[test]
    fn negative_threshold_is_wider_by_default() {
        let damping = PitchDamping::default();
        assert_eq!(damping.apply(-0.02), 0.0);
        assert_close(damping.apply(-0.05), -0.0495, 1e-12);
    }

    #[test]
    fn symmetric_damping_mirrors_bounds() {
        let damping = PitchDamping::symmetric(0.99, 0.003);
        assert_eq!(damping.apply(-0.002), 0.0);
        assert_close(damping.apply(-0.004), -0.00396, 1e-12);
    }

    #[test]
    fn decay_from_one_reaches_exact_zero() {
        let damping = PitchDamping::default();
        let mut rot = RotationState::new(0.0, 1.0);
        let mut ticks = 0;
        while rot.pitch != 0.0 {
            rot.damp_pitch(&damping);
            ticks += 1;
            assert!(ticks < 10_000);
        }
        // 0.99^k drops to 0.003 after ~578 ticks.
        assert!((570..=590).contains(&ticks), "ticks {ticks}");
    }

    #[test]
    fn normalize_folds_by_half_turns() {
        assert_close(normalize_pitch(PI + 0.5), 0.5, 1e-12);
        assert_close(normalize_pitch(-PI - 0.5), -0.5, 1e-12);
        assert_close(normalize_pitch(3.0 * PI + 0.25), 0.25, 1e-9);
        assert_eq!(normalize_pitch(0.7), 0.7);
        assert_eq!(normalize_pitch(f64::INFINITY), 0.0);
    }

    #[test]
    fn damping_deserializes_with_defaults() {
        let d: PitchDamping = serde_json::from_str(r#"{"factor": 0.95}"#).unwrap();
        assert_eq!(d.factor, 0.95);
        assert_eq!(d.upper_threshold, 0.003);
        assert_eq!(d.lower_threshold, -0.03);
    }
}
