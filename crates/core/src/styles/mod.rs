//! Spec styles: how each Kotest convention declares its tests
//!
//! Every supported style is a variant of the closed [`SpecStyle`] enum. The
//! recognition rules live in small [`StyleStrategy`] implementations; the enum
//! dispatches to them and applies membership gating for styles that need it.

pub mod nested;
pub mod registry;
pub mod string_spec;

pub use nested::NestedStyle;
pub use registry::StyleRegistry;
pub use string_spec::StringSpecStyle;

use crate::patterns::{MatchResult, NoMatch};
use crate::syntax::Node;
use crate::types::RecognizedTest;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Recognition rules of one spec style
pub trait StyleStrategy: Send + Sync {
    /// Fully-qualified name of the base class specs of this style extend
    fn fq_name(&self) -> &'static str;

    /// Human readable style name
    fn style_name(&self) -> &'static str;

    /// Source for an empty test named `test_name`
    fn generate_test(&self, test_name: &str) -> String;

    /// Matches `node` against the style's shapes in priority order
    ///
    /// Does not check which class the node sits in.
    fn try_match(&self, node: Node) -> MatchResult<RecognizedTest>;

    /// Maps a token to the expression it may start, rejecting on kind and text
    /// alone when the token cannot be part of any shape of this style
    fn candidate_for_leaf<'t>(&self, leaf: Node<'t>) -> Option<Node<'t>>;

    /// Name of `node` if it is a container of this style
    fn container_name(&self, _node: Node) -> Option<String> {
        None
    }

    /// Whether matches only count inside a confirmed spec of this style
    fn requires_membership(&self) -> bool {
        false
    }
}

/// Answers whether a class is a spec of a given style
pub trait SpecMembership {
    fn is_specification_of(&self, class: Node, style: SpecStyle) -> bool;
}

/// Membership check for callers that have already confirmed the enclosing spec
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeMembership;

impl SpecMembership for AssumeMembership {
    fn is_specification_of(&self, _class: Node, _style: SpecStyle) -> bool {
        true
    }
}

/// A supported Kotest spec style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecStyle {
    StringSpec,
    ExpectSpec,
    FunSpec,
    ShouldSpec,
}

static STRING_SPEC: StringSpecStyle = StringSpecStyle;

static EXPECT_SPEC: NestedStyle = NestedStyle {
    fq_name: "io.kotest.core.spec.style.ExpectSpec",
    style_name: "Expect Spec",
    container_fn: "context",
    test_fn: "expect",
};

static FUN_SPEC: NestedStyle = NestedStyle {
    fq_name: "io.kotest.core.spec.style.FunSpec",
    style_name: "Fun Spec",
    container_fn: "context",
    test_fn: "test",
};

static SHOULD_SPEC: NestedStyle = NestedStyle {
    fq_name: "io.kotest.core.spec.style.ShouldSpec",
    style_name: "Should Spec",
    container_fn: "context",
    test_fn: "should",
};

impl SpecStyle {
    /// Every style, in registration order
    pub const ALL: [SpecStyle; 4] = [
        SpecStyle::StringSpec,
        SpecStyle::ExpectSpec,
        SpecStyle::FunSpec,
        SpecStyle::ShouldSpec,
    ];

    pub fn strategy(self) -> &'static dyn StyleStrategy {
        match self {
            SpecStyle::StringSpec => &STRING_SPEC,
            SpecStyle::ExpectSpec => &EXPECT_SPEC,
            SpecStyle::FunSpec => &FUN_SPEC,
            SpecStyle::ShouldSpec => &SHOULD_SPEC,
        }
    }

    pub fn fq_name(self) -> &'static str {
        self.strategy().fq_name()
    }

    /// Last segment of the base class name, e.g. `StringSpec`
    pub fn short_name(self) -> &'static str {
        let fq_name = self.fq_name();
        fq_name.rsplit('.').next().unwrap_or(fq_name)
    }

    pub fn style_name(self) -> &'static str {
        self.strategy().style_name()
    }

    pub fn generate_test(self, test_name: &str) -> String {
        self.strategy().generate_test(test_name)
    }

    /// A complete spec class holding one empty test
    pub fn generate_spec(self, spec_name: &str, test_name: &str) -> String {
        format!(
            "class {spec_name} : {}({{\n    {}\n}})\n",
            self.short_name(),
            self.generate_test(test_name)
        )
    }

    /// Recognizes `node` as a test or container of this style
    pub fn try_recognize(
        self,
        node: Node,
        membership: &dyn SpecMembership,
    ) -> MatchResult<RecognizedTest> {
        let strategy = self.strategy();
        let test = strategy.try_match(node)?;
        if strategy.requires_membership() {
            let in_spec = node
                .enclosing_class()
                .is_some_and(|class| membership.is_specification_of(class, self));
            if !in_spec {
                trace!("{} match for {:?} is outside a {} spec", self, test.name, self);
                return Err(NoMatch::NotInSpec);
            }
        }
        Ok(test)
    }

    pub fn recognize(self, node: Node, membership: &dyn SpecMembership) -> Option<RecognizedTest> {
        self.try_recognize(node, membership).ok()
    }

    /// Recognition entry point for a single token
    pub fn recognize_from_leaf(
        self,
        leaf: Node,
        membership: &dyn SpecMembership,
    ) -> Option<RecognizedTest> {
        let candidate = self.strategy().candidate_for_leaf(leaf)?;
        self.recognize(candidate, membership)
    }

    pub fn container_name(self, node: Node) -> Option<String> {
        self.strategy().container_name(node)
    }
}

impl fmt::Display for SpecStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style_name())
    }
}

/// Builds a [`RecognizedTest`] anchored at `node`
pub(crate) fn recognized(
    node: Node,
    name: String,
    containers: Vec<String>,
    kind: crate::types::TestKind,
) -> RecognizedTest {
    RecognizedTest {
        path: crate::hierarchy::join_path(&containers, &name),
        name,
        containers,
        kind,
        anchor: node.id(),
        span: node.span(),
    }
}
