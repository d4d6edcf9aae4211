use scene::components::Shape3D;
use scene::world::World;

use crate::mesh::material_rgba;
use crate::renderer::{RenderFrame, RenderSpace};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Every polyline in a frame expanded to `LineList` vertex pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBatch {
    /// Arcs and spokes, turned by the group matrix at draw time.
    pub group: Vec<ColorVertex>,
    pub world: Vec<ColorVertex>,
}

impl LineBatch {
    pub fn from_frame(frame: &RenderFrame, world: &World) -> Self {
        let mut batch = Self::default();
        for cmd in &frame.commands {
            let Shape3D::Polyline { geometry } = cmd.shape else {
                continue;
            };
            let Some(polyline) = world.polyline(geometry) else {
                continue;
            };
            let color = material_rgba(&cmd.material);
            let out = match cmd.space {
                RenderSpace::Group => &mut batch.group,
                RenderSpace::World => &mut batch.world,
            };
            for pair in polyline.points.windows(2) {
                for p in pair {
                    out.push(ColorVertex {
                        position: cmd.model.transform_point(*p).as_f32_array(),
                        color,
                    });
                }
            }
        }
        batch
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.world.is_empty()
    }
}

/// Point-cloud vertices (the starfield) in world space.
pub fn point_vertices(frame: &RenderFrame, world: &World) -> Vec<ColorVertex> {
    let mut out = Vec::new();
    for cmd in &frame.commands {
        let Shape3D::Points { geometry } = cmd.shape else {
            continue;
        };
        let Some(cloud) = world.point_cloud(geometry) else {
            continue;
        };
        let color = material_rgba(&cmd.material);
        out.extend(cloud.points.iter().map(|p| ColorVertex {
            position: cmd.world.transform_point(*p).as_f32_array(),
            color,
        }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{LineBatch, point_vertices};
    use crate::renderer::Renderer;
    use foundation::color::Rgb;
    use foundation::math::GeoCoordinate;
    use scene::prefabs::{
        RouteStyle, StarfieldStyle, spawn_flight_route, spawn_globe_group, spawn_starfield,
    };
    use scene::world::World;

    #[test]
    fn arcs_and_spokes_expand_to_line_pairs() {
        let mut world = World::new();
        let group = spawn_globe_group(&mut world);
        spawn_flight_route(
            &mut world,
            group,
            GeoCoordinate::new(10.0, 20.0),
            GeoCoordinate::new(-5.0, 100.0),
            Rgb::from_hex(0xd71f1f),
            &RouteStyle::default(),
        );

        let batch = LineBatch::from_frame(&Renderer::collect(&world), &world);
        // Two spokes of one segment each, plus a 50-point arc.
        assert_eq!(batch.group.len(), 2 * 2 + 49 * 2);
        assert!(batch.world.is_empty());
        assert_eq!(batch.group[0].position, [0.0, 0.0, 0.0]);
        assert!(batch
            .group
            .iter()
            .any(|v| v.color == Rgb::from_hex(0xd71f1f).with_alpha(1.0)));
    }

    #[test]
    fn empty_world_has_no_lines() {
        let world = World::new();
        assert!(LineBatch::from_frame(&Renderer::collect(&world), &world).is_empty());
    }

    #[test]
    fn starfield_points_are_collected() {
        let mut world = World::new();
        let style = StarfieldStyle {
            count: 128,
            ..StarfieldStyle::default()
        };
        spawn_starfield(&mut world, &style);
        let points = point_vertices(&Renderer::collect(&world), &world);
        assert_eq!(points.len(), 128);
    }
}
