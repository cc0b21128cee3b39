//! Infrastructure layer
//!
//! Application configuration and logging setup.

mod config;
mod logging;

pub use config::{Config, ConfigError, CONFIG_FILE};
pub use logging::init_logging;
