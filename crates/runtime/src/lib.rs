pub mod config;
pub mod frame;
pub mod globe_view;
pub mod input;
pub mod interval;
pub mod rotation;

pub use config::*;
pub use frame::*;
pub use globe_view::*;
pub use input::*;
pub use interval::*;
pub use rotation::*;
