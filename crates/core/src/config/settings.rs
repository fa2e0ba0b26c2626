use crate::{
    error::{Error, Result},
    styles::StyleRegistry,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::GradleConfig;

pub const CONFIG_FILE_NAMES: [&str; 2] = [".kospec.json", "kospec.json"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Resolve superclasses through the project index before falling back to
    /// short-name matching
    #[serde(default = "default_true")]
    pub resolve_symbols: bool,

    /// Directories indexed for symbol resolution, relative to the config file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_roots: Vec<PathBuf>,

    /// Enabled styles; every style when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,

    #[serde(default)]
    pub gradle: GradleConfig,

    // Directory the config was loaded from (internal, not exposed in JSON)
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolve_symbols: true,
            source_roots: Vec::new(),
            styles: None,
            gradle: GradleConfig::default(),
            root: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.root = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Finds the nearest config file in `start_path` or any parent directory
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }
            current = current.parent()?;
        }
    }

    /// Loads the nearest config above `start_path`, or the default config
    pub fn discover(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// The style registry this config enables
    pub fn registry(&self) -> Result<StyleRegistry> {
        match &self.styles {
            Some(names) => StyleRegistry::with_styles(names.as_slice()),
            None => Ok(StyleRegistry::new()),
        }
    }

    /// Source roots as absolute paths
    pub fn resolved_source_roots(&self) -> Vec<PathBuf> {
        self.source_roots
            .iter()
            .map(|root| match &self.root {
                Some(base) if root.is_relative() => base.join(root),
                _ => root.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::SpecStyle;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            source_roots: vec![PathBuf::from("src/test/kotlin")],
            styles: Some(vec!["FunSpec".to_string()]),
            gradle: GradleConfig {
                command: Some("gradle".to_string()),
                env: Some(HashMap::from([(
                    "GRADLE_OPTS".to_string(),
                    "-Xmx1g".to_string(),
                )])),
                ..Default::default()
            },
            ..Default::default()
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert_eq!(parsed.gradle.command(), "gradle");
        assert_eq!(parsed.gradle.task(), "test");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.resolve_symbols);
        assert!(config.source_roots.is_empty());
        assert_eq!(config.registry().unwrap().len(), SpecStyle::ALL.len());
        assert_eq!(config.gradle.command(), "./gradlew");
    }

    #[test]
    fn test_unknown_style_is_an_error() {
        let config = Config {
            styles: Some(vec!["FreeSpec".to_string()]),
            ..Default::default()
        };
        assert!(config.registry().is_err());
    }

    #[test]
    fn test_find_config_in_parent_and_resolve_roots() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("module/src/test/kotlin");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config {
            source_roots: vec![PathBuf::from("module/src/test/kotlin")],
            ..Default::default()
        };
        config.save_to_file(&temp.path().join(".kospec.json")).unwrap();

        let found = Config::find_config_file(&nested).unwrap();
        assert_eq!(found, temp.path().join(".kospec.json"));

        let loaded = Config::discover(&nested).unwrap();
        assert_eq!(loaded.resolved_source_roots(), vec![nested]);
    }
}
