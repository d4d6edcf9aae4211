use foundation::color::Rgb;
use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::World;
use crate::components::{Light, Role, Transform};
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingStyle {
    pub directional_color: u32,
    pub directional_intensity: f32,
    /// Directional light offset from the rig origin; it shines toward the origin.
    pub directional_position: [f64; 3],
    pub cast_shadow: bool,
    pub ambient_color: u32,
    pub ambient_intensity: f32,
}

impl Default for LightingStyle {
    fn default() -> Self {
        Self {
            directional_color: 0xffffff,
            directional_intensity: 1.0,
            directional_position: [10.0, 0.0, 0.0],
            cast_shadow: true,
            ambient_color: 0xffffff,
            ambient_intensity: 0.25,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LightRig {
    pub rig: EntityId,
    pub directional: EntityId,
    pub ambient: EntityId,
}

/// Lighting object parented to the globe group. Its own yaw is the light
/// angle, so the sun sweeps around the globe independently of the view.
pub fn spawn_light_rig(world: &mut World, group: EntityId, style: &LightingStyle) -> LightRig {
    let rig = world.spawn_child(group);
    world.set_role(rig, Role::LightRig);

    let [x, y, z] = style.directional_position;
    let directional = world.spawn_child(rig);
    world.set_transform(directional, Transform::translate(Vec3::new(x, y, z)));
    world.set_light(
        directional,
        Light::Directional {
            color: Rgb::from_hex(style.directional_color),
            intensity: style.directional_intensity,
            cast_shadow: style.cast_shadow,
        },
    );
    world.set_role(directional, Role::Light);

    let ambient = world.spawn_child(rig);
    world.set_light(
        ambient,
        Light::Ambient {
            color: Rgb::from_hex(style.ambient_color),
            intensity: style.ambient_intensity,
        },
    );
    world.set_role(ambient, Role::Light);

    LightRig {
        rig,
        directional,
        ambient,
    }
}

pub fn set_light_rig_angle(world: &mut World, rig: &LightRig, angle: f64) {
    if let Some(transform) = world.transform_mut(rig.rig) {
        transform.rotation.y = angle;
    }
}
