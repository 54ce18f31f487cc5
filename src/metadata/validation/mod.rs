//! Load-time validation settings.

mod config;

pub use config::ValidationConfig;
