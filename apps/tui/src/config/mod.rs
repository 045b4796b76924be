// Config module for agri-dashboard
// Reads `.env` and environment variables into an `AppConfig`

#[allow(clippy::module_inception)]
mod config;

pub use config::{init_app_config, AppConfig, ConfigError};
