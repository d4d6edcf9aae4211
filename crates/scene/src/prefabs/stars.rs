use foundation::color::Rgb;
use foundation::hash::HashSequence;
use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::World;
use crate::components::{Drawable3D, Material, PointCloud, Role, Transform, Visibility};
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldStyle {
    pub count: usize,
    pub seed: u32,
    pub color: u32,
    pub point_size: f32,
    pub visible: bool,
}

impl Default for StarfieldStyle {
    fn default() -> Self {
        Self {
            count: 10_000,
            seed: 0x5eed,
            color: 0xffffff,
            point_size: 1.0,
            visible: true,
        }
    }
}

/// Star positions behind the globe: `x = (a-0.3)*2000`, `y = (b-0.5)*2000`,
/// `z = -c*3000`, with `a`, `b` and `c` drawn separately for every star.
pub fn generate_star_positions(count: usize, seed: u32) -> Vec<Vec3> {
    let mut seq = HashSequence::new(seed);
    (0..count)
        .map(|_| {
            let x = (seq.next_unit() - 0.3) * 2000.0;
            let y = (seq.next_unit() - 0.5) * 2000.0;
            let z = -seq.next_unit() * 3000.0;
            Vec3::new(x, y, z)
        })
        .collect()
}

pub fn spawn_starfield(world: &mut World, style: &StarfieldStyle) -> EntityId {
    let geometry = world.add_point_cloud(PointCloud::new(generate_star_positions(
        style.count,
        style.seed,
    )));
    let entity = world.spawn();
    world.set_transform(entity, Transform::identity());
    world.set_drawable_3d(entity, Drawable3D::points(geometry));
    world.set_material(entity, Material::points(Rgb::from_hex(style.color), style.point_size));
    world.set_role(entity, Role::Starfield);
    world.set_visibility(entity, Visibility { visible: style.visible });
    entity
}
