use serde::{Deserialize, Serialize};

use super::position::Span;
use crate::syntax::NodeId;

/// Separator placed between the segments of a test path
pub const PATH_SEPARATOR: &str = " -- ";

/// Whether a recognized node groups other tests or is itself runnable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Contributes a path segment, holds nested tests, not runnable on its own
    Container,
    /// A runnable leaf
    Test,
}

/// A test or container recognized in a spec body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedTest {
    /// The literal name given at this node
    pub name: String,
    /// Enclosing container names followed by `name`, joined with [`PATH_SEPARATOR`]
    pub path: String,
    /// Names of the enclosing containers, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<String>,
    pub kind: TestKind,
    /// Node the test was derived from; only meaningful for the tree it came from
    #[serde(skip)]
    pub anchor: NodeId,
    pub span: Span,
}

impl RecognizedTest {
    pub fn is_container(&self) -> bool {
        matches!(self.kind, TestKind::Container)
    }

    /// Number of enclosing containers
    pub fn depth(&self) -> usize {
        self.containers.len()
    }

    /// Path segments, outermost first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.containers
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
    }
}
