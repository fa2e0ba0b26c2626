//! Configuration management for kospec

mod gradle_config;
mod settings;

// Re-export main types
pub use gradle_config::{DEFAULT_GRADLE_COMMAND, DEFAULT_GRADLE_TASK, GradleConfig};
pub use settings::{CONFIG_FILE_NAMES, Config};
