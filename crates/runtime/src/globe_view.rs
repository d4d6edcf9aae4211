//! Interaction and animation state for the rotating globe.
//!
//! `GlobeViewState` is the single owner of the globe's orientation. The
//! browser shell feeds it pointer input through an [`InputQueue`] and calls
//! [`GlobeViewState::step_frame`] once per display refresh; renderers only
//! read [`GlobeViewState::rotation`] and [`GlobeViewState::light_angle`].
//!
//! Per frame the order is fixed: queued input, then auto-rotation, then any
//! damping ticks that came due during the frame.

use foundation::math::Vec2;
use tracing::{debug, trace};

use crate::config::AnimationConfig;
use crate::frame::Frame;
use crate::input::{InputEvent, InputQueue};
use crate::interval::IntervalTimer;
use crate::rotation::RotationState;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    AutoRotating,
    Dragging,
}

/// Pointer position and orientation captured at pointer-down.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragSession {
    pub origin_px: Vec2,
    pub base: RotationState,
}

/// Viewport size in CSS pixels. Never smaller than 1x1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// What happened during one [`GlobeViewState::step_frame`] call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: Frame,
    pub inputs_applied: usize,
    pub damping_ticks: u32,
}

#[derive(Debug, Clone)]
pub struct GlobeViewState {
    config: AnimationConfig,
    rotation: RotationState,
    light_angle: f64,
    drag: Option<DragSession>,
    viewport: Viewport,
    damping_timer: IntervalTimer,
    frame: Frame,
}

impl Default for GlobeViewState {
    fn default() -> Self {
        Self::new(AnimationConfig::default(), Viewport::default())
    }
}

impl GlobeViewState {
    pub fn new(config: AnimationConfig, viewport: Viewport) -> Self {
        Self {
            config,
            rotation: RotationState::default(),
            light_angle: 0.0,
            drag: None,
            viewport,
            damping_timer: IntervalTimer::new(
                config.damping_interval_s,
                config.max_damping_catch_up,
            ),
            frame: Frame::default(),
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }

    pub fn light_angle(&self) -> f64 {
        self.light_angle
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn mode(&self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::AutoRotating
        }
    }

    /// Start a drag, snapshotting the current orientation as the baseline.
    ///
    /// A second pointer-down without a pointer-up restarts the session from
    /// the current position.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag = Some(DragSession {
            origin_px: Vec2::new(x, y),
            base: self.rotation,
        });
        debug!(x, y, yaw = self.rotation.yaw, pitch = self.rotation.pitch, "drag started");
    }

    /// Rotate relative to the drag baseline. Ignored outside a drag.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(session) = self.drag else {
            return;
        };

        let turn = self.config.drag_rotation_per_viewport_rad;
        let dx = x - session.origin_px.x;
        let dy = y - session.origin_px.y;

        self.rotation.yaw = session.base.yaw + (dx / self.viewport.width) * turn;
        self.rotation.pitch = session.base.pitch + (dy / self.viewport.height) * turn;
        trace!(yaw = self.rotation.yaw, pitch = self.rotation.pitch, "drag moved");
    }

    pub fn pointer_up(&mut self) {
        if self.drag.take().is_some() {
            debug!(yaw = self.rotation.yaw, pitch = self.rotation.pitch, "drag ended");
        }
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::PointerUp => self.pointer_up(),
        }
    }

    /// One tick of the pitch damping timer.
    ///
    /// Runs whether or not a drag is active, so a held drag is pulled back
    /// toward level between pointer moves.
    pub fn damping_tick(&mut self) {
        self.rotation.damp_pitch(&self.config.damping);
    }

    /// Per-frame auto-rotation of the globe and the lighting rig.
    pub fn auto_rotate(&mut self) {
        self.rotation.yaw += self.config.yaw_step_rad;
        self.light_angle += self.config.light_step_rad;
    }

    /// Advance one rendered frame.
    pub fn step_frame(&mut self, dt_s: f64, input: &mut InputQueue) -> FrameReport {
        self.frame = self.frame.advance(dt_s);

        let pending = input.drain();
        let inputs_applied = pending.len();
        for queued in pending {
            self.apply_input(queued.event);
        }

        self.auto_rotate();

        let damping_ticks = self.damping_timer.advance(self.frame.dt_s);
        for _ in 0..damping_ticks {
            self.damping_tick();
        }

        input.begin_frame(self.frame);

        FrameReport {
            frame: self.frame,
            inputs_applied,
            damping_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeViewState, InteractionMode, Viewport};
    use crate::config::AnimationConfig;
    use crate::input::{InputEvent, InputQueue};
    use crate::rotation::{PitchDamping, RotationState};
    use std::f64::consts::{PI, TAU};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn still_config() -> AnimationConfig {
        AnimationConfig {
            yaw_step_rad: 0.0,
            light_step_rad: 0.0,
            ..AnimationConfig::default()
        }
    }

    #[test]
    fn starts_auto_rotating_at_rest() {
        let view = GlobeViewState::default();
        assert_eq!(view.mode(), InteractionMode::AutoRotating);
        assert_eq!(view.rotation(), RotationState::default());
        assert_eq!(view.light_angle(), 0.0);
    }

    #[test]
    fn auto_rotation_advances_yaw_and_light_each_frame() {
        let mut view = GlobeViewState::default();
        let mut queue = InputQueue::new();
        for _ in 0..10 {
            view.step_frame(1.0 / 60.0, &mut queue);
        }
        assert_close(view.rotation().yaw, 10.0 * 0.00125, 1e-12);
        assert_close(view.light_angle(), 10.0 * 0.005, 1e-12);
        assert_eq!(view.frame().index, 10);
    }

    #[test]
    fn drag_maps_full_viewport_to_full_turn() {
        let mut view = GlobeViewState::new(still_config(), Viewport::new(800.0, 600.0));
        view.pointer_down(100.0, 100.0);
        assert_eq!(view.mode(), InteractionMode::Dragging);

        view.pointer_move(500.0, 250.0);
        assert_close(view.rotation().yaw, 0.5 * TAU, 1e-12);
        assert_close(view.rotation().pitch, 0.25 * TAU, 1e-12);

        // Moves are relative to the pointer-down snapshot, not cumulative.
        view.pointer_move(100.0, 100.0);
        assert_close(view.rotation().yaw, 0.0, 1e-12);
        assert_close(view.rotation().pitch, 0.0, 1e-12);
    }

    #[test]
    fn drag_is_relative_to_rotation_at_pointer_down() {
        let mut view = GlobeViewState::new(still_config(), Viewport::new(1000.0, 500.0));
        view.set_rotation(RotationState::new(1.0, 0.2));
        view.pointer_down(0.0, 0.0);
        view.pointer_move(-250.0, 50.0);
        assert_close(view.rotation().yaw, 1.0 - 0.25 * TAU, 1e-12);
        assert_close(view.rotation().pitch, 0.2 + 0.1 * TAU, 1e-12);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut view = GlobeViewState::new(still_config(), Viewport::new(800.0, 600.0));
        view.pointer_move(400.0, 300.0);
        assert_eq!(view.rotation(), RotationState::default());
    }

    #[test]
    fn pointer_up_resumes_auto_rotation_from_drag_result() {
        let mut view = GlobeViewState::new(AnimationConfig::default(), Viewport::new(800.0, 600.0));
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        queue.push(InputEvent::PointerMove { x: 400.0, y: 0.0 });
        queue.push(InputEvent::PointerUp);

        let report = view.step_frame(0.0, &mut queue);
        assert_eq!(report.inputs_applied, 3);
        assert_eq!(view.mode(), InteractionMode::AutoRotating);
        assert_close(view.rotation().yaw, PI + 0.00125, 1e-12);

        view.step_frame(0.0, &mut queue);
        assert_close(view.rotation().yaw, PI + 0.0025, 1e-12);
    }

    #[test]
    fn input_is_applied_before_auto_rotation() {
        let mut view = GlobeViewState::new(AnimationConfig::default(), Viewport::new(800.0, 600.0));
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        queue.push(InputEvent::PointerMove { x: 0.0, y: 0.0 });
        view.step_frame(0.0, &mut queue);
        // Move sets yaw to the baseline (0), then the frame adds one step.
        assert_close(view.rotation().yaw, 0.00125, 1e-12);
    }

    #[test]
    fn damping_runs_every_interval() {
        let mut view = GlobeViewState::new(still_config(), Viewport::default());
        view.set_rotation(RotationState::new(0.0, 1.0));
        let mut queue = InputQueue::new();

        let mut ticks = 0;
        for _ in 0..10 {
            ticks += view.step_frame(0.05, &mut queue).damping_ticks;
        }
        assert_eq!(ticks, 10);
        assert_close(view.rotation().pitch, 0.99f64.powi(10), 1e-12);
    }

    #[test]
    fn damping_ticks_accumulate_across_short_frames() {
        let mut view = GlobeViewState::new(still_config(), Viewport::default());
        view.set_rotation(RotationState::new(0.0, 1.0));
        let mut queue = InputQueue::new();

        let total: u32 = (0..6)
            .map(|_| view.step_frame(0.02, &mut queue).damping_ticks)
            .sum();
        // 0.12s of frames at a 0.05s period.
        assert_eq!(total, 2);
    }

    #[test]
    fn damping_keeps_running_during_drag() {
        let mut view = GlobeViewState::new(still_config(), Viewport::new(100.0, 100.0));
        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        queue.push(InputEvent::PointerMove { x: 0.0, y: 10.0 });
        view.step_frame(0.05, &mut queue);

        assert_eq!(view.mode(), InteractionMode::Dragging);
        assert_close(view.rotation().pitch, 0.1 * TAU * 0.99, 1e-12);
    }

    #[test]
    fn small_pitch_snaps_to_zero() {
        let mut view = GlobeViewState::new(still_config(), Viewport::default());
        view.set_rotation(RotationState::new(0.0, 0.002));
        view.damping_tick();
        assert_eq!(view.rotation().pitch, 0.0);

        view.set_rotation(RotationState::new(0.0, -0.02));
        view.damping_tick();
        assert_eq!(view.rotation().pitch, 0.0);
    }

    #[test]
    fn symmetric_damping_is_configurable() {
        let config = AnimationConfig {
            damping: PitchDamping::symmetric(0.99, 0.003),
            ..still_config()
        };
        let mut view = GlobeViewState::new(config, Viewport::default());
        view.set_rotation(RotationState::new(0.0, -0.02));
        view.damping_tick();
        assert_close(view.rotation().pitch, -0.0198, 1e-12);
    }

    #[test]
    fn viewport_is_clamped() {
        let vp = Viewport::new(0.0, f64::NAN);
        assert_eq!(vp.width, 1.0);
        assert_eq!(vp.height, 1.0);
    }
}
