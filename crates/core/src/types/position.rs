use serde::{Deserialize, Serialize};

/// Represents a position in a text document using 0-based line and character indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A source range, start inclusive and end exclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Check if a line number is within this span
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start.line && line <= self.end.line
    }

    pub fn line_count(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_line() {
        let span = Span::new(Position::new(2, 4), Position::new(5, 1));
        assert!(!span.contains_line(1));
        assert!(span.contains_line(2));
        assert!(span.contains_line(5));
        assert!(!span.contains_line(6));
        assert_eq!(span.line_count(), 3);
    }
}
