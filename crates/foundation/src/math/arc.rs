//! Great-circle arc sampling.
//!
//! Arcs are produced by rotating the start point about the axis normal to the
//! plane through the origin and both endpoints. Reversing the endpoints flips
//! the axis, so `sample_arc(b, a, ..)` walks the same circle from the other
//! end; it is not a pointwise reversal guarantee.

use std::f64::consts::TAU;

use super::Vec3;

/// Rotation axis carrying `start` toward `end` about the origin.
///
/// This is `normalize((origin - end) × (start - end))`, which reduces to the
/// direction of `start × end`. When the endpoints are coincident or
/// antipodal the plane is undefined; the axis then falls back to a unit
/// vector perpendicular to `start` (`start × Y`, or `start × X` when `start`
/// is parallel to `Y`).
pub fn arc_axis(start: Vec3, end: Vec3) -> Vec3 {
    let cb = Vec3::ZERO - end;
    let ab = start - end;
    if let Some(axis) = cb.cross(ab).try_normalize() {
        return axis;
    }

    start
        .cross(Vec3::Y)
        .try_normalize()
        .or_else(|| start.cross(Vec3::X).try_normalize())
        .unwrap_or(Vec3::Y)
}

/// Sample `sample_count` points along the arc from `start` to `end`.
///
/// The first sample is `start`. With `clockwise` set the arc takes the long
/// way round (`angle - 2π`). Zero samples yields an empty vector and one
/// sample yields `[start]`.
pub fn sample_arc(start: Vec3, end: Vec3, sample_count: usize, clockwise: bool) -> Vec<Vec3> {
    match sample_count {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }

    let axis = arc_axis(start, end);
    let mut angle = start.angle_to(end);
    if clockwise {
        angle -= TAU;
    }
    let step = angle / (sample_count - 1) as f64;

    (0..sample_count)
        .map(|i| {
            if i == 0 {
                start
            } else {
                start.rotate_about_axis(axis, step * i as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{arc_axis, sample_arc};
    use crate::math::{Vec3, lat_lon_to_vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let d = a.distance(b);
        assert!(d <= eps, "expected {a:?} ~= {b:?} (distance {d})");
    }

    #[test]
    fn returns_requested_count_starting_at_start() {
        let a = lat_lon_to_vec3(10.0, 20.0, 16.0);
        let b = lat_lon_to_vec3(-5.0, 100.0, 16.0);
        let pts = sample_arc(a, b, 50, false);
        assert_eq!(pts.len(), 50);
        assert_eq!(pts[0], a);
        assert_vec_close(pts[49], b, 1e-9);
    }

    #[test]
    fn samples_stay_on_the_sphere() {
        let a = lat_lon_to_vec3(51.5, -0.1, 16.0);
        let b = lat_lon_to_vec3(35.7, 139.7, 16.0);
        for p in sample_arc(a, b, 32, false) {
            assert_close(p.length(), 16.0, 1e-9);
        }
    }

    #[test]
    fn consecutive_samples_are_equally_spaced() {
        let a = lat_lon_to_vec3(40.6, -73.8, 16.0);
        let b = lat_lon_to_vec3(-33.9, 151.2, 16.0);
        let pts = sample_arc(a, b, 20, false);
        let total = a.angle_to(b);
        for pair in pts.windows(2) {
            assert_close(pair[0].angle_to(pair[1]), total / 19.0, 1e-9);
        }
    }

    #[test]
    fn clockwise_takes_the_long_way() {
        let a = lat_lon_to_vec3(0.0, 0.0, 1.0);
        let b = lat_lon_to_vec3(0.0, 90.0, 1.0);
        let short = sample_arc(a, b, 5, false);
        let long = sample_arc(a, b, 5, true);

        assert_vec_close(long[4], b, 1e-9);
        // The midpoint of the long arc is opposite the midpoint of the short one.
        assert_vec_close(long[2], -short[2], 1e-9);
    }

    #[test]
    fn reversed_endpoints_trace_the_same_circle() {
        let a = lat_lon_to_vec3(10.0, 20.0, 16.0);
        let b = lat_lon_to_vec3(-5.0, 100.0, 16.0);
        let forward = sample_arc(a, b, 11, false);
        let backward = sample_arc(b, a, 11, false);

        assert_eq!(backward[0], b);
        assert_vec_close(backward[10], a, 1e-9);
        assert_vec_close(backward[5], forward[5], 1e-9);
    }

    #[test]
    fn small_counts() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert!(sample_arc(a, b, 0, false).is_empty());
        assert_eq!(sample_arc(a, b, 1, false), vec![a]);
        let two = sample_arc(a, b, 2, false);
        assert_eq!(two[0], a);
        assert_vec_close(two[1], b, 1e-12);
    }

    #[test]
    fn coincident_endpoints_stay_put() {
        let a = lat_lon_to_vec3(12.0, 34.0, 16.0);
        for p in sample_arc(a, a, 8, false) {
            assert_vec_close(p, a, 1e-6);
        }
    }

    #[test]
    fn antipodal_endpoints_use_fallback_axis() {
        let a = lat_lon_to_vec3(0.0, 0.0, 16.0);
        let b = -a;
        let axis = arc_axis(a, b);
        assert_close(axis.length(), 1.0, 1e-12);
        assert_close(axis.dot(a), 0.0, 1e-9);

        let pts = sample_arc(a, b, 9, false);
        assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()));
        assert_vec_close(pts[8], b, 1e-9);
    }

    #[test]
    fn pole_to_pole_uses_x_fallback() {
        let a = Vec3::new(0.0, 16.0, 0.0);
        let axis = arc_axis(a, -a);
        assert_close(axis.length(), 1.0, 1e-12);
        assert_close(axis.dot(Vec3::Y), 0.0, 1e-12);
    }
}
