//! Configuration loading and resolution into run settings.
pub(crate) mod apply;
mod loader;
mod settings;
pub mod types;


pub use apply::resolve_settings;
pub use loader::load_config;
pub use settings::{PlanSettings, RunSettings};

#[cfg(test)]
pub(crate) use loader::load_config_file;
