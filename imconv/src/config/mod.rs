//! Configuration: command-line arguments, environment overrides, defaults,
//! and validation.

pub mod app_config;
pub mod args;
pub mod defaults;
pub mod validation;

pub use app_config::AppConfig;
pub use args::Args;
