use anyhow::{Context, Result};
use kospec_core::command::{DEBUG_RUNNER_ID, FRAMEWORK_NAME};
use kospec_core::{FileAnalysis, GradleCommand};
use serde_json::json;
use std::path::Path;
use tracing::debug;

use crate::display::formatter::{print_analysis, print_target};
use crate::utils::{build_scanner, line_index, parse_filepath_with_line};

pub fn analyze_command(filepath_arg: &str, json: bool, no_resolve: bool) -> Result<()> {
    debug!("Analyzing file: {}", filepath_arg);

    let (filepath, line) = parse_filepath_with_line(filepath_arg);
    let line = line.map(line_index).transpose()?;
    let absolute_path = absolute(Path::new(&filepath))?;
    if !absolute_path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", absolute_path.display()));
    }

    let mut scanner = build_scanner(&absolute_path, no_resolve)?;
    let analysis = scanner
        .analyze_file(&absolute_path)
        .with_context(|| format!("Failed to analyze {}", absolute_path.display()))?;

    if json {
        println!("{}", to_json(&analysis, line, &scanner.config().gradle)?);
        return Ok(());
    }

    print_analysis(&filepath, &analysis);
    if let Some(line) = line {
        match analysis.target_at_line(line) {
            Some(target) => {
                let command = GradleCommand::for_target(&target, &scanner.config().gradle);
                print_target(line, &target, &command);
            }
            None => println!("\n❌ No spec or test at line {}", line + 1),
        }
    }
    Ok(())
}

fn to_json(
    analysis: &FileAnalysis,
    line: Option<u32>,
    gradle: &kospec_core::config::GradleConfig,
) -> Result<String> {
    let value = match line {
        Some(line) => {
            let target = analysis.target_at_line(line);
            let command = target
                .as_ref()
                .map(|target| GradleCommand::for_target(target, gradle).to_shell_command());
            json!({
                "line": line + 1,
                "test": analysis.test_at_line(line),
                "target": target,
                "command": command,
                "framework": FRAMEWORK_NAME,
                "debug_runner": DEBUG_RUNNER_ID,
            })
        }
        None => serde_json::to_value(analysis)?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

pub(crate) fn absolute(path: &Path) -> Result<std::path::PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
