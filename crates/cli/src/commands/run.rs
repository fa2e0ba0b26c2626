use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use super::analyze::absolute;
use crate::utils::{build_scanner, line_index, parse_filepath_with_line};

pub fn run_command(filepath_arg: &str, dry_run: bool) -> Result<()> {
    // Parse filepath and line number
    let (filepath, line) = parse_filepath_with_line(filepath_arg);
    let line = line_index(line.context("A line number is required, e.g. MySpec.kt:12")?)?;

    debug!("Running file: {} at line: {}", filepath, line);

    let absolute_path = absolute(Path::new(&filepath))?;
    let mut scanner = build_scanner(&absolute_path, false)?;
    let command = scanner.build_command(&absolute_path, line)?;

    if dry_run {
        println!("{}", command.to_shell_command());
        if let Some(ref dir) = command.working_dir {
            println!("Working directory: {}", dir);
        }
        return Ok(());
    }

    let shell_cmd = command.to_shell_command();
    info!("Running: {}", shell_cmd);
    if let Some(ref dir) = command.working_dir {
        info!("Working directory: {}", dir);
    }

    let status = command
        .to_process_command()
        .status()
        .with_context(|| format!("Failed to execute: {}", shell_cmd))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}
