//! CPU-side render preparation: camera matrices, per-frame draw lists, and
//! vertex data laid out for direct upload to GPU buffers.

pub mod camera;
pub mod lines;
pub mod mesh;
pub mod renderer;
pub mod uniforms;

pub use camera::*;
pub use lines::*;
pub use mesh::*;
pub use renderer::*;
pub use uniforms::*;
