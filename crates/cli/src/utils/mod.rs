pub mod index;
pub mod parser;

pub use index::{build_scanner, kotlin_files};
pub use parser::{line_index, parse_filepath_with_line};
