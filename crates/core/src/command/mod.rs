//! Gradle command generation for Kotest targets

pub mod gradle_command;
pub mod target;

// Re-export commonly used types
pub use gradle_command::{GradleCommand, SPEC_FILTER_ENV, TEST_FILTER_ENV};
pub use target::{DEBUG_RUNNER_ID, FRAMEWORK_NAME, TestTarget, find_gradle_root};
