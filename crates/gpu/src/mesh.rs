use std::f64::consts::{PI, TAU};

use foundation::math::Vec3;
use scene::components::{Material, Role, Shape3D};

use crate::renderer::RenderFrame;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed UV sphere.
///
/// Vertex grid is `(height_segments + 1) x (width_segments + 1)`, row 0 at
/// the north pole. Longitude seams are duplicated so UVs wrap cleanly, and
/// pole rows emit a single triangle per quad.
///
/// `uv.y` grows southward: textures are uploaded top row first, so `v = 0`
/// samples the northern edge of an equirectangular map.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn generate(radius: f64, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);

        let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        for iy in 0..=hs {
            let v = iy as f64 / hs as f64;
            // Offset pole UVs to the middle of their quad.
            let u_offset = if iy == 0 {
                0.5 / ws as f64
            } else if iy == hs {
                -0.5 / ws as f64
            } else {
                0.0
            };
            let (sin_t, cos_t) = (v * PI).sin_cos();

            for ix in 0..=ws {
                let u = ix as f64 / ws as f64;
                let (sin_p, cos_p) = (u * TAU).sin_cos();

                let x = -cos_p * sin_t;
                let y = cos_t;
                let z = sin_p * sin_t;
                vertices.push(MeshVertex {
                    position: [
                        (radius * x) as f32,
                        (radius * y) as f32,
                        (radius * z) as f32,
                    ],
                    normal: [x as f32, y as f32, z as f32],
                    uv: [(u + u_offset) as f32, v as f32],
                });
            }
        }

        let stride = ws + 1;
        let mut indices = Vec::with_capacity((ws * (hs * 2 - 2) * 3) as usize);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * stride + ix + 1;
                let b = iy * stride + ix;
                let c = (iy + 1) * stride + ix;
                let d = (iy + 1) * stride + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Per-instance data for spheres drawn from one shared unit mesh.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    pub center: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

/// Marker spheres from a frame, in their command's space.
pub fn marker_instances(frame: &RenderFrame) -> Vec<SphereInstance> {
    frame
        .with_role(Role::Marker)
        .filter_map(|cmd| {
            let Shape3D::Sphere { radius, .. } = cmd.shape else {
                return None;
            };
            let center = cmd.model.transform_point(Vec3::ZERO);
            Some(SphereInstance {
                center: center.as_f32_array(),
                radius: radius as f32,
                color: material_rgba(&cmd.material),
            })
        })
        .collect()
}

pub(crate) fn material_rgba(material: &Material) -> [f32; 4] {
    material.color.with_alpha(1.0)
}

#[cfg(test)]
mod tests {
    use super::{MeshVertex, SphereMesh, marker_instances};
    use crate::renderer::Renderer;
    use foundation::color::Rgb;
    use foundation::math::{GeoCoordinate, Vec3, lat_lon_to_vec3};
    use scene::prefabs::{RouteStyle, spawn_flight_route, spawn_globe_group};
    use scene::world::World;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn earth_mesh_counts() {
        let mesh = SphereMesh::generate(15.0, 64, 32);
        assert_eq!(mesh.vertices.len(), 65 * 33);
        assert_eq!(mesh.triangle_count(), 64 * (32 * 2 - 2));
        let max = *mesh.indices.iter().max().expect("indices");
        assert!((max as usize) < mesh.vertices.len());
    }

    #[test]
    fn vertices_lie_on_radius_with_unit_normals() {
        let mesh = SphereMesh::generate(15.0, 16, 8);
        for v in &mesh.vertices {
            let [x, y, z] = v.position.map(f64::from);
            assert_close((x * x + y * y + z * z).sqrt(), 15.0, 1e-4);
            let [nx, ny, nz] = v.normal.map(f64::from);
            assert_close((nx * nx + ny * ny + nz * nz).sqrt(), 1.0, 1e-6);
        }
    }

    #[test]
    fn texture_seam_matches_projection() {
        // u = 0.5 lies on the prime meridian of the equirectangular day map.
        let mesh = SphereMesh::generate(1.0, 4, 2);
        let equator_mid = mesh.vertices[5 + 2];
        assert_eq!(equator_mid.uv, [0.5, 0.5]);
        let expected = lat_lon_to_vec3(0.0, 0.0, 1.0);
        let [x, y, z] = equator_mid.position.map(f64::from);
        assert_close(x, expected.x, 1e-6);
        assert_close(y, expected.y, 1e-6);
        assert_close(z, expected.z, 1e-6);
    }

    #[test]
    fn uv_rows_follow_latitude_from_the_top_of_the_image() {
        let mesh = SphereMesh::generate(1.0, 8, 6);
        assert_eq!(mesh.vertices[0].uv[1], 0.0);
        assert_eq!(mesh.vertices.last().map(|v| v.uv[1]), Some(1.0));

        for lat in [60.0, 30.0, 0.0, -30.0, -60.0] {
            let p = lat_lon_to_vec3(lat, 0.0, 1.0);
            let dist = |v: &MeshVertex| Vec3::new(
                v.position[0].into(),
                v.position[1].into(),
                v.position[2].into(),
            )
            .distance(p);
            let nearest = mesh
                .vertices
                .iter()
                .min_by(|a, b| dist(a).total_cmp(&dist(b)))
                .unwrap();
            // Image row for this latitude, as a fraction of the height.
            let row = (90.0 - lat) / 180.0;
            assert_close(f64::from(nearest.uv[1]), row, 1e-6);
        }
    }

    #[test]
    fn tiny_segment_counts_are_clamped() {
        let mesh = SphereMesh::generate(1.0, 0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert_eq!(mesh.triangle_count(), 3 * 2);
    }

    #[test]
    fn markers_become_instances() {
        let mut world = World::new();
        let group = spawn_globe_group(&mut world);
        spawn_flight_route(
            &mut world,
            group,
            GeoCoordinate::new(10.0, 20.0),
            GeoCoordinate::new(-5.0, 100.0),
            Rgb::from_hex(0xffd300),
            &RouteStyle::default(),
        );
        let instances = marker_instances(&Renderer::collect(&world));
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].radius, 0.1);
        assert_eq!(instances[0].color, [1.0, 1.0, 1.0, 1.0]);
        let expected = lat_lon_to_vec3(10.0, 20.0, 16.0);
        assert_close(instances[0].center[0] as f64, expected.x, 1e-4);
    }
}
