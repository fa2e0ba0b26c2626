//! Kotlin source parsing using tree-sitter

pub mod kotlin_parser;
pub mod utils;

// Re-export commonly used items
pub use kotlin_parser::KotlinParser;
pub use utils::{node_to_position, node_to_span};
