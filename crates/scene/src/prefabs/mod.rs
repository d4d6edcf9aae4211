//! Builders that spawn the globe's scene objects into a [`World`](crate::World).

pub mod globe;
pub mod lighting;
pub mod routes;
pub mod stars;

pub use globe::*;
pub use lighting::*;
pub use routes::*;
pub use stars::*;
