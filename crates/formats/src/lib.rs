pub mod airports;
pub mod config;
pub mod dataset;
pub mod globe_loader;
pub mod routes;

pub use airports::*;
pub use config::*;
pub use dataset::*;
pub use globe_loader::*;
pub use routes::*;
