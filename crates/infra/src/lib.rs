//! Infrastructure layer: repository implementations and configuration.

pub mod config;
pub mod repositories;


pub use config::{AppConfig, ConfigError};
pub use repositories::Repositories;
