use foundation::math::Mat4;

use crate::camera::Camera3D;
use crate::renderer::LightingState;

/// Per-frame uniform block shared by every globe pipeline.
///
/// Matches the WGSL struct:
/// ```text
/// struct Globals {
///     view_proj: mat4x4<f32>,
///     group: mat4x4<f32>,
///     sun_dir: vec4<f32>,    // xyz direction, w intensity
///     sun_color: vec4<f32>,
///     ambient: vec4<f32>,    // rgb premultiplied by intensity
///     params: vec4<f32>,     // x displacement scale
///     eye: vec4<f32>,        // camera position, w = 1
/// };
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobeUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub group: [[f32; 4]; 4],
    pub sun_dir: [f32; 4],
    pub sun_color: [f32; 4],
    pub ambient: [f32; 4],
    pub params: [f32; 4],
    pub eye: [f32; 4],
}

impl GlobeUniforms {
    pub fn new(
        camera: &Camera3D,
        aspect: f64,
        group: Mat4,
        lighting: &LightingState,
        displacement_scale: f64,
    ) -> Self {
        let d = lighting.sun_direction;
        let ambient = lighting.ambient_color;
        let a = lighting.ambient_intensity;
        let e = camera.position;
        Self {
            view_proj: camera.view_proj(aspect).to_cols_f32(),
            group: group.to_cols_f32(),
            sun_dir: [d.x as f32, d.y as f32, d.z as f32, lighting.sun_intensity],
            sun_color: lighting.sun_color.with_alpha(1.0),
            ambient: [ambient.r * a, ambient.g * a, ambient.b * a, 1.0],
            params: [displacement_scale as f32, 0.0, 0.0, 0.0],
            eye: [e.x as f32, e.y as f32, e.z as f32, 1.0],
        }
    }
}
