//! Startup-time modules.

pub mod config;

pub use config::{apply_env_overrides, default_config_path, load_config, load_config_with_env};
