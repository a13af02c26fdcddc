//! Configuration loading, layering, and validation into a [`RunConfig`].
mod apply;
mod loader;
mod run;
pub mod types;


pub use apply::apply_config;
pub use loader::{DEFAULT_CONFIG_FILES, load_config};
pub use run::RunConfig;

#[cfg(test)]
pub(crate) use loader::load_config_file;
