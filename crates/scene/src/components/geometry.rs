use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PolylineId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PointCloudId(pub u32);

/// Ordered vertices drawn as a connected line strip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Vec3>,
}

impl Polyline {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Number of line segments in the strip.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    pub points: Vec<Vec3>,
}

impl PointCloud {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::Polyline;
    use foundation::math::Vec3;

    #[test]
    fn segment_count_handles_short_lines() {
        assert_eq!(Polyline::default().segment_count(), 0);
        assert_eq!(Polyline::new(vec![Vec3::ZERO]).segment_count(), 0);
        assert_eq!(Polyline::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y]).segment_count(), 2);
    }
}
