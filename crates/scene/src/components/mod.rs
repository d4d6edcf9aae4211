pub mod drawable3d;
pub mod geometry;
pub mod light;
pub mod material;
pub mod role;
pub mod transform;
pub mod visibility;

pub use drawable3d::*;
pub use geometry::*;
pub use light::*;
pub use material::*;
pub use role::*;
pub use transform::*;
pub use visibility::*;
