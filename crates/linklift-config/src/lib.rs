//! # LinkLift Config
//!
//! TOML configuration for the LinkLift automation tool: where to find
//! Chrome and which Google Photos surfaces to drive.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
