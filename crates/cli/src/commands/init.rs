use anyhow::{Context, Result};
use kospec_core::Config;
use kospec_core::config::CONFIG_FILE_NAMES;
use std::{env, path::PathBuf};
use tracing::info;

/// Conventional Gradle test source directories, checked in order
const SOURCE_ROOT_CANDIDATES: [&str; 4] = [
    "src/test/kotlin",
    "src/jvmTest/kotlin",
    "src/commonTest/kotlin",
    "src/main/kotlin",
];

pub fn init_command(cwd: Option<&str>, force: bool) -> Result<()> {
    // Determine the project root
    let project_root = if let Some(cwd) = cwd {
        PathBuf::from(cwd)
    } else {
        env::current_dir().context("Failed to get current directory")?
    };

    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    println!("🚀 Initializing kospec in: {}", project_root.display());

    let source_roots: Vec<PathBuf> = SOURCE_ROOT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .filter(|root| project_root.join(root).is_dir())
        .collect();
    for root in &source_roots {
        info!("Found source root: {}", root.display());
    }

    let config = Config {
        source_roots,
        ..Default::default()
    };
    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    if config.source_roots.is_empty() {
        println!("   • No source roots found; add them to enable symbol resolution");
    } else {
        println!("   • Indexing {} source roots", config.source_roots.len());
    }
    Ok(())
}
