use crate::components::{PointCloudId, PolylineId};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    /// UV sphere centered on the entity origin.
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    /// Connected line strip stored in the world's polyline table.
    Polyline { geometry: PolylineId },
    /// Unconnected points stored in the world's point-cloud table.
    Points { geometry: PointCloudId },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
}

impl Drawable3D {
    pub fn sphere(radius: f64, width_segments: u32, height_segments: u32) -> Self {
        Self {
            shape: Shape3D::Sphere {
                radius,
                width_segments,
                height_segments,
            },
        }
    }

    pub fn polyline(geometry: PolylineId) -> Self {
        Self {
            shape: Shape3D::Polyline { geometry },
        }
    }

    pub fn points(geometry: PointCloudId) -> Self {
        Self {
            shape: Shape3D::Points { geometry },
        }
    }
}
