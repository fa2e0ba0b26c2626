use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Framework name reported to run and debug collaborators
pub const FRAMEWORK_NAME: &str = "Kotest";

/// Runner id used when a run is started under a debugger
pub const DEBUG_RUNNER_ID: &str = "KotestDebug";

const GRADLE_ROOT_MARKERS: [&str; 5] = [
    "settings.gradle.kts",
    "settings.gradle",
    "gradlew",
    "build.gradle.kts",
    "build.gradle",
];

/// What to run: a whole spec, or one test or container inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTarget {
    pub spec_fq_name: String,
    /// Test path as built by the hierarchy, `None` for the whole spec
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_path: Option<String>,
}

impl TestTarget {
    pub fn spec(spec_fq_name: impl Into<String>) -> Self {
        Self {
            spec_fq_name: spec_fq_name.into(),
            test_path: None,
        }
    }

    pub fn test(spec_fq_name: impl Into<String>, test_path: impl Into<String>) -> Self {
        Self {
            spec_fq_name: spec_fq_name.into(),
            test_path: Some(test_path.into()),
        }
    }

    /// Human readable label, e.g. `com.example.MySpec / a -- b`
    pub fn label(&self) -> String {
        match &self.test_path {
            Some(path) => format!("{} / {}", self.spec_fq_name, path),
            None => self.spec_fq_name.clone(),
        }
    }
}

/// The directory Gradle should run in for `file_path`
///
/// Walks up to the outermost directory holding a settings file, or failing
/// that the nearest one holding any Gradle build marker.
pub fn find_gradle_root(file_path: &Path) -> Option<PathBuf> {
    let start = if file_path.is_dir() {
        file_path
    } else {
        file_path.parent()?
    };

    let mut nearest = None;
    let mut settings = None;
    for dir in start.ancestors() {
        if dir.join("settings.gradle.kts").exists() || dir.join("settings.gradle").exists() {
            settings = Some(dir.to_path_buf());
        }
        if nearest.is_none() && GRADLE_ROOT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            nearest = Some(dir.to_path_buf());
        }
    }
    settings.or(nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_label() {
        assert_eq!(TestTarget::spec("a.B").label(), "a.B");
        assert_eq!(TestTarget::test("a.B", "x -- y").label(), "a.B / x -- y");
    }

    #[test]
    fn test_find_gradle_root_prefers_settings() {
        let temp = TempDir::new().unwrap();
        let module = temp.path().join("core");
        let sources = module.join("src/test/kotlin");
        std::fs::create_dir_all(&sources).unwrap();
        std::fs::write(temp.path().join("settings.gradle.kts"), "").unwrap();
        std::fs::write(module.join("build.gradle.kts"), "").unwrap();
        let spec = sources.join("MySpec.kt");
        std::fs::write(&spec, "").unwrap();

        assert_eq!(find_gradle_root(&spec), Some(temp.path().to_path_buf()));
    }
}
