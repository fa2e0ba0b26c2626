use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{analyze_command, init_command, run_command, stub_command, styles_command};

#[derive(Parser, Debug)]
#[command(name = "kospec")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a Kotlin file and list its specs, tests and callbacks
    #[command(visible_alias = "a")]
    Analyze {
        /// Path to the Kotlin file with optional line number (e.g., src/test/kotlin/MySpec.kt:10)
        filepath: String,

        /// Print the analysis as JSON
        #[arg(short, long)]
        json: bool,

        /// Classify by short names only, without indexing source roots
        #[arg(long)]
        no_resolve: bool,
    },
    /// Print an empty test for a spec style
    Stub {
        /// Style name (e.g., StringSpec, expect_spec, "Fun Spec")
        style: String,

        /// Name of the test
        name: String,

        /// Wrap the test in a spec class with this name
        #[arg(short, long)]
        spec: Option<String>,
    },
    /// List the supported spec styles
    Styles,
    /// Run the spec or test at a specific location with Gradle
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Kotlin file with line number (e.g., src/test/kotlin/MySpec.kt:10)
        filepath: String,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Initialize kospec configuration
    Init {
        /// Specify the current working directory
        #[arg(short, long)]
        cwd: Option<String>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Analyze {
                filepath,
                json,
                no_resolve,
            } => analyze_command(&filepath, json, no_resolve),
            Commands::Stub { style, name, spec } => stub_command(&style, &name, spec.as_deref()),
            Commands::Styles => styles_command(),
            Commands::Run { filepath, dry_run } => run_command(&filepath, dry_run),
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}
