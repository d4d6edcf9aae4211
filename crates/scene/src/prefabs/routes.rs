use foundation::color::Rgb;
use foundation::math::{GeoCoordinate, Vec3, sample_arc};
use serde::{Deserialize, Serialize};

use crate::World;
use crate::components::{Drawable3D, Material, Polyline, Role, Transform};
use crate::entity::EntityId;

pub const DEFAULT_ROUTE_PALETTE: [u32; 6] = [
    0xd71f1f, 0xe13c32, 0xffd300, 0x7bb661, 0x639853, 0x006b3d,
];

/// Geometry parameters shared by every drawn route.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteStyle {
    /// Radius at which markers, spoke ends and arcs sit. Slightly above the
    /// earth surface so arcs are not hidden by displaced terrain.
    pub arc_radius: f64,
    pub arc_samples: usize,
    pub clockwise: bool,
    pub marker_radius: f64,
    pub marker_width_segments: u32,
    pub marker_height_segments: u32,
    pub marker_color: u32,
    pub spoke_color: u32,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            arc_radius: 16.0,
            arc_samples: 50,
            clockwise: false,
            marker_radius: 0.1,
            marker_width_segments: 32,
            marker_height_segments: 24,
            marker_color: 0xffffff,
            spoke_color: 0xffffff,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlightRouteEntities {
    pub markers: [EntityId; 2],
    pub spokes: [EntityId; 2],
    pub arc: EntityId,
}

/// Palette slot for the `index`-th of `route_count` routes.
///
/// Routes are split into `palette_len` equal bands in drawing order; the
/// result is clamped to the last slot.
pub fn route_palette_index(index: usize, route_count: usize, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let band = route_count as f64 / palette_len as f64;
    if band <= 0.0 {
        return 0;
    }
    ((index as f64 / band).floor() as usize).min(palette_len - 1)
}

pub fn route_color(index: usize, route_count: usize, palette: &[u32]) -> Rgb {
    palette
        .get(route_palette_index(index, route_count, palette.len()))
        .map(|hex| Rgb::from_hex(*hex))
        .unwrap_or(Rgb::WHITE)
}

/// Spawn endpoint markers, center spokes and the great-circle arc for one
/// route. Everything is parented to `group`.
pub fn spawn_flight_route(
    world: &mut World,
    group: EntityId,
    departure: GeoCoordinate,
    arrival: GeoCoordinate,
    color: Rgb,
    style: &RouteStyle,
) -> FlightRouteEntities {
    let start = departure.project(style.arc_radius);
    let end = arrival.project(style.arc_radius);

    let markers = [
        spawn_marker(world, group, start, style),
        spawn_marker(world, group, end, style),
    ];
    let spokes = [
        spawn_spoke(world, group, start, style),
        spawn_spoke(world, group, end, style),
    ];

    let points = sample_arc(start, end, style.arc_samples, style.clockwise);
    let geometry = world.add_polyline(Polyline::new(points));
    let arc = world.spawn_child(group);
    world.set_drawable_3d(arc, Drawable3D::polyline(geometry));
    world.set_material(arc, Material::line(color));
    world.set_role(arc, Role::FlightArc);

    FlightRouteEntities { markers, spokes, arc }
}

fn spawn_marker(world: &mut World, group: EntityId, at: Vec3, style: &RouteStyle) -> EntityId {
    let entity = world.spawn_child(group);
    world.set_transform(entity, Transform::translate(at));
    world.set_drawable_3d(
        entity,
        Drawable3D::sphere(
            style.marker_radius,
            style.marker_width_segments,
            style.marker_height_segments,
        ),
    );
    world.set_material(entity, Material::basic(Rgb::from_hex(style.marker_color)));
    world.set_role(entity, Role::Marker);
    entity
}

fn spawn_spoke(world: &mut World, group: EntityId, to: Vec3, style: &RouteStyle) -> EntityId {
    let geometry = world.add_polyline(Polyline::new(vec![Vec3::ZERO, to]));
    let entity = world.spawn_child(group);
    world.set_drawable_3d(entity, Drawable3D::polyline(geometry));
    world.set_material(entity, Material::line(Rgb::from_hex(style.spoke_color)));
    world.set_role(entity, Role::Spoke);
    entity
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_ROUTE_PALETTE, RouteStyle, route_color, route_palette_index, spawn_flight_route,
    };
    use crate::World;
    use crate::components::{Role, Shape3D};
    use crate::prefabs::spawn_globe_group;
    use foundation::color::Rgb;
    use foundation::math::{GeoCoordinate, Vec3};

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let d = a.distance(b);
        assert!(d <= eps, "expected {a:?} ~= {b:?} (distance {d})");
    }

    #[test]
    fn palette_bands_follow_route_order() {
        assert_eq!(route_palette_index(0, 250, 6), 0);
        assert_eq!(route_palette_index(41, 250, 6), 0);
        assert_eq!(route_palette_index(42, 250, 6), 1);
        assert_eq!(route_palette_index(249, 250, 6), 5);
    }

    #[test]
    fn palette_index_is_clamped() {
        assert_eq!(route_palette_index(400, 250, 6), 5);
        assert_eq!(route_palette_index(3, 0, 6), 0);
        assert_eq!(route_palette_index(3, 10, 0), 0);
    }

    #[test]
    fn route_color_reads_palette() {
        assert_eq!(route_color(0, 250, &DEFAULT_ROUTE_PALETTE), Rgb::from_hex(0xd71f1f));
        assert_eq!(route_color(0, 250, &[]), Rgb::WHITE);
    }

    #[test]
    fn spawns_markers_spokes_and_arc_under_group() {
        let mut world = World::new();
        let group = spawn_globe_group(&mut world);
        let dep = GeoCoordinate::new(10.0, 20.0);
        let arr = GeoCoordinate::new(-5.0, 100.0);
        let style = RouteStyle::default();
        let color = Rgb::from_hex(0xffd300);
        let route = spawn_flight_route(&mut world, group, dep, arr, color, &style);

        assert_eq!(world.entities_with_role(Role::Marker).len(), 2);
        assert_eq!(world.entities_with_role(Role::Spoke).len(), 2);
        assert_eq!(world.entities_with_role(Role::FlightArc), vec![route.arc]);
        for e in route.markers.iter().chain(route.spokes.iter()) {
            assert_eq!(world.parent(*e), Some(group));
        }

        let marker_pos = world.world_matrix(route.markers[1]).transform_point(Vec3::ZERO);
        assert_vec_close(marker_pos, arr.project(16.0), 1e-9);

        let Some(Shape3D::Polyline { geometry }) = world.drawable_3d(route.arc).map(|d| d.shape)
        else {
            panic!("arc should be a polyline");
        };
        let arc = world.polyline(geometry).expect("arc geometry");
        assert_eq!(arc.points.len(), 50);
        assert_eq!(arc.points[0], dep.project(16.0));
        assert_vec_close(arc.points[49], arr.project(16.0), 1e-9);
        assert_eq!(
            world.material(route.arc).map(|m| m.color),
            Some(Rgb::from_hex(0xffd300))
        );
    }
}
