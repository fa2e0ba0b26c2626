//! kospec - Kotest spec and test recognition from Kotlin syntax trees
//!
//! This crate provides functionality to:
//! - Parse Kotlin source files into a lightweight syntax tree
//! - Decide which classes are Kotest specs, and of which style
//! - Recognize tests and containers and build their hierarchical paths
//! - Find lifecycle callbacks declared in a spec
//! - Build the Gradle command that runs a recognized spec or test
pub mod callbacks;
pub mod classifier;
pub mod command;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod parser;
pub mod patterns;
pub mod scanner;
pub mod specs;
pub mod styles;
pub mod symbols;
pub mod syntax;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use classifier::{Classification, Classifier, Confidence};
pub use command::{GradleCommand, TestTarget};
pub use config::Config;
pub use parser::KotlinParser;
pub use patterns::{MatchResult, NoMatch};
pub use scanner::{FileAnalysis, SpecAnalysis, SpecScanner};
pub use specs::{generate_stub, list_callbacks, list_specifications, list_tests};
pub use styles::{SpecStyle, StyleRegistry, StyleStrategy};
pub use symbols::{ClassSymbol, ImportContext, IndexOverlay, ProjectIndex, SymbolResolver};
pub use syntax::{Node, NodeId, NodeKind, SyntaxTree};
