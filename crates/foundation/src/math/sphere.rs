use super::Vec3;

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoCoordinate {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoCoordinate {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    pub fn project(self, radius: f64) -> Vec3 {
        lat_lon_to_vec3(self.lat_deg, self.lon_deg, radius)
    }
}

/// Project latitude/longitude (degrees) onto a sphere of `radius`.
///
/// The frame is Y-up: the north pole maps to `+Y`, and longitude 0 lies on
/// `+X`. Inputs are not validated; out-of-range angles still produce a point
/// on the sphere.
pub fn lat_lon_to_vec3(lat_deg: f64, lon_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vec3::new(
        -radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}
