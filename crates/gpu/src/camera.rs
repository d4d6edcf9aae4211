use foundation::math::{Mat4, Vec3};
use runtime::RotationState;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::look_at(
            Vec3::new(0.0, 0.0, 40.0),
            Vec3::ZERO,
            75f64.to_radians(),
            0.1,
            1000.0,
        )
    }
}

impl Camera3D {
    pub fn look_at(position: Vec3, target: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y_rad,
            near,
            far,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self, aspect: f64) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Mat4::perspective_rh_z0(self.fov_y_rad, aspect, self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f64) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

/// Globe group orientation as a matrix: `Rx(pitch) * Ry(yaw)`.
pub fn group_matrix(rotation: &RotationState) -> Mat4 {
    Mat4::from_euler_xyz(Vec3::new(rotation.pitch, rotation.yaw, 0.0))
}

#[cfg(test)]
mod tests {
    use super::{Camera3D, group_matrix};
    use foundation::math::{Mat4, Vec3};
    use runtime::RotationState;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f64) {
        let d = a.distance(b);
        assert!(d <= eps, "expected {a:?} ~= {b:?} (distance {d})");
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera3D::default();
        let p = camera.view_proj(16.0 / 9.0).transform_point(Vec3::ZERO);
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
        assert!(p.z > 0.0 && p.z < 1.0, "depth {}", p.z);
    }

    #[test]
    fn north_pole_projects_above_center() {
        let camera = Camera3D::default();
        let p = camera
            .view_proj(1.0)
            .transform_point(Vec3::new(0.0, 15.0, 0.0));
        assert!(p.y > 0.0);
    }

    #[test]
    fn bad_aspect_falls_back_to_square() {
        let camera = Camera3D::default();
        assert_eq!(camera.projection(0.0), camera.projection(1.0));
        assert_eq!(camera.projection(f64::NAN), camera.projection(1.0));
    }

    #[test]
    fn group_matrix_applies_yaw_then_pitch() {
        let m = group_matrix(&RotationState::new(FRAC_PI_2, 0.0));
        assert_vec_close(m.transform_point(Vec3::X), -Vec3::Z, 1e-12);

        let m = group_matrix(&RotationState::new(FRAC_PI_2, FRAC_PI_2));
        let expected = Mat4::rotation_x(FRAC_PI_2).transform_point(-Vec3::Z);
        assert_vec_close(m.transform_point(Vec3::X), expected, 1e-12);
    }
}
