#![deny(clippy::all)]

pub mod config;
mod externals;
mod manifest;
pub mod plugin;
mod plugin_driver;
pub mod types;
mod utils;

pub use config::load_config;
pub use externals::*;
pub use manifest::*;
pub use plugin_driver::*;
