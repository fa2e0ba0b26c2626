use serde::{Deserialize, Serialize};

use super::position::Span;
use crate::syntax::NodeId;

/// Lifecycle hooks a spec can declare in its initializer block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    BeforeTest,
    AfterTest,
    BeforeSpec,
    AfterSpec,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 4] = [
        CallbackKind::BeforeTest,
        CallbackKind::AfterTest,
        CallbackKind::BeforeSpec,
        CallbackKind::AfterSpec,
    ];

    /// The DSL function name that declares this callback
    pub fn keyword(self) -> &'static str {
        match self {
            CallbackKind::BeforeTest => "beforeTest",
            CallbackKind::AfterTest => "afterTest",
            CallbackKind::BeforeSpec => "beforeSpec",
            CallbackKind::AfterSpec => "afterSpec",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callback {
    pub kind: CallbackKind,
    #[serde(skip)]
    pub anchor: NodeId,
    pub span: Span,
}
