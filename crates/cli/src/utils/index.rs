use anyhow::{Context, Result};
use kospec_core::{Config, ProjectIndex, SpecScanner};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const SKIPPED_DIRS: [&str; 4] = ["build", ".gradle", ".idea", "out"];

/// Kotlin sources below `root`, skipping build output and tool directories
pub fn kotlin_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || e
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !SKIPPED_DIRS.contains(&name))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "kt" || ext == "kts"))
        .map(|e| e.into_path())
        .collect()
}

/// A scanner configured for `file`, with its source roots indexed
pub fn build_scanner(file: &Path, no_resolve: bool) -> Result<SpecScanner> {
    let start = file.parent().unwrap_or(file);
    let mut config = Config::discover(start).context("Failed to load configuration")?;
    if no_resolve {
        config.resolve_symbols = false;
    }

    let roots = config.resolved_source_roots();
    let resolve = config.resolve_symbols;
    let mut scanner = SpecScanner::with_config(config)?;
    if !resolve || roots.is_empty() {
        return Ok(scanner);
    }

    let mut index = ProjectIndex::new();
    for root in roots {
        for path in kotlin_files(&root) {
            if let Err(e) = index.add_file(scanner.parser_mut(), &path) {
                warn!("Skipping {}: {}", path.display(), e);
            }
        }
    }
    debug!("Indexed {} classes", index.len());
    Ok(scanner.with_index(index))
}
