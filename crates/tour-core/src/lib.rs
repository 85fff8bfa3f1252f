pub mod angle;
pub mod config;
pub mod constants;
pub mod error;
pub mod graph;
pub mod navigation;
pub mod session;

/// Built-in tour: five rooms of the demo apartment plus the shared logo overlay.
pub static APARTMENT_JSON: &str = include_str!("../assets/apartment.json");

pub use angle::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use graph::*;
pub use navigation::*;
pub use session::*;
