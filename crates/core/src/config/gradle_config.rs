use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_GRADLE_COMMAND: &str = "./gradlew";
pub const DEFAULT_GRADLE_TASK: &str = "test";

/// How test runs are handed to Gradle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GradleConfig {
    /// Gradle executable, `./gradlew` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Test task, `test` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<HashMap<String, String>>,
}

impl GradleConfig {
    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or(DEFAULT_GRADLE_COMMAND)
    }

    pub fn task(&self) -> &str {
        self.task.as_deref().unwrap_or(DEFAULT_GRADLE_TASK)
    }

    pub fn extra_args(&self) -> &[String] {
        self.extra_args.as_deref().unwrap_or_default()
    }
}
