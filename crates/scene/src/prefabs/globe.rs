use foundation::math::Vec3;
use runtime::RotationState;
use serde::{Deserialize, Serialize};

use crate::World;
use crate::components::{
    Blending, Drawable3D, Material, Role, ShaderProgram, Side, TextureSlot, Transform,
};
use crate::entity::EntityId;

/// Earth sphere and atmosphere shell parameters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeStyle {
    pub earth_radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub displacement_scale: f64,
    /// Uniform scale of the atmosphere shell relative to the earth sphere.
    pub atmosphere_scale: f64,
}

impl Default for GlobeStyle {
    fn default() -> Self {
        Self {
            earth_radius: 15.0,
            width_segments: 64,
            height_segments: 32,
            displacement_scale: 1.0,
            atmosphere_scale: 1.1,
        }
    }
}

/// Root container rotated by the view state. Earth, routes and the light rig
/// hang off it.
pub fn spawn_globe_group(world: &mut World) -> EntityId {
    let entity = world.spawn();
    world.set_transform(entity, Transform::identity());
    world.set_role(entity, Role::GlobeGroup);
    entity
}

pub fn spawn_earth(world: &mut World, group: EntityId, style: &GlobeStyle) -> EntityId {
    let entity = world.spawn_child(group);
    world.set_drawable_3d(
        entity,
        Drawable3D::sphere(style.earth_radius, style.width_segments, style.height_segments),
    );
    world.set_material(
        entity,
        Material::standard_textured(
            TextureSlot::EarthDay,
            Some(TextureSlot::EarthDisplacement),
            style.displacement_scale,
        )
        .with_blending(Blending::Additive),
    );
    world.set_role(entity, Role::Earth);
    entity
}

/// Glow shell around the earth. Not parented to the group, so it stays put
/// while the globe turns.
pub fn spawn_atmosphere(world: &mut World, style: &GlobeStyle) -> EntityId {
    let entity = world.spawn();
    world.set_transform(
        entity,
        Transform::identity().with_uniform_scale(style.atmosphere_scale),
    );
    world.set_drawable_3d(
        entity,
        Drawable3D::sphere(style.earth_radius, style.width_segments, style.height_segments),
    );
    world.set_material(
        entity,
        Material::shader(ShaderProgram::Atmosphere)
            .with_blending(Blending::Additive)
            .with_side(Side::Back),
    );
    world.set_role(entity, Role::Atmosphere);
    entity
}

/// Copy the view rotation onto the group: pitch about X, yaw about Y.
pub fn apply_view_rotation(world: &mut World, group: EntityId, rotation: &RotationState) {
    match world.transform_mut(group) {
        Some(transform) => {
            transform.rotation = Vec3::new(rotation.pitch, rotation.yaw, 0.0);
        }
        None => {
            world.set_transform(
                group,
                Transform::identity().with_rotation(Vec3::new(rotation.pitch, rotation.yaw, 0.0)),
            );
        }
    }
}
