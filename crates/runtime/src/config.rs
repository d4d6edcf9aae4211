use serde::{Deserialize, Serialize};

use crate::rotation::PitchDamping;

/// Tuning for the auto-rotation and damping loop.
///
/// Steps are per rendered frame, not per second.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Yaw added to the globe group every frame (radians).
    pub yaw_step_rad: f64,
    /// Yaw added to the lighting rig every frame (radians).
    pub light_step_rad: f64,
    /// Period of the pitch damping timer (seconds).
    pub damping_interval_s: f64,
    /// Upper bound on damping ticks replayed in one frame.
    pub max_damping_catch_up: u32,
    /// Rotation produced by dragging across the full viewport (radians).
    pub drag_rotation_per_viewport_rad: f64,
    pub damping: PitchDamping,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            yaw_step_rad: 0.00125,
            light_step_rad: 0.005,
            damping_interval_s: 0.05,
            max_damping_catch_up: 20,
            drag_rotation_per_viewport_rad: std::f64::consts::TAU,
            damping: PitchDamping::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnimationConfig;

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: AnimationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, AnimationConfig::default());
    }

    #[test]
    fn nested_damping_overrides_merge_with_defaults() {
        let cfg: AnimationConfig =
            serde_json::from_str(r#"{"yaw_step_rad": 0.01, "damping": {"lower_threshold": -0.003}}"#)
                .unwrap();
        assert_eq!(cfg.yaw_step_rad, 0.01);
        assert_eq!(cfg.damping.lower_threshold, -0.003);
        assert_eq!(cfg.damping.factor, 0.99);
        assert_eq!(cfg.damping_interval_s, 0.05);
    }
}
