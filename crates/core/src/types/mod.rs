pub mod callback;
pub mod position;
pub mod recognized;

// Re-export commonly used types
pub use callback::{Callback, CallbackKind};
pub use position::{Position, Span};
pub use recognized::{PATH_SEPARATOR, RecognizedTest, TestKind};
