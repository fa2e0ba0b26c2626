//! Decides whether a class is a spec, and of which style
//!
//! Classification walks the superclass chain. Each step first tries the
//! [`SymbolResolver`]; when a name cannot be resolved the walk falls back to
//! comparing the written short name with the styles' base class names. That
//! fallback is imprecise (any class called `StringSpec` matches), so results
//! carry a [`Confidence`] saying which tier produced them.

use crate::patterns::{MatchResult, NoMatch};
use crate::styles::{SpecMembership, SpecStyle, StyleRegistry};
use crate::symbols::{ImportContext, SymbolResolver, class_fq_name, short_name, super_type_name};
use crate::syntax::Node;
use crate::types::RecognizedTest;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Which resolution tier produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Every step of the chain resolved to a symbol
    Resolved,
    /// A step was matched by its short name only
    Textual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub style: SpecStyle,
    pub confidence: Confidence,
}

#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    registry: &'a StyleRegistry,
    resolver: Option<&'a dyn SymbolResolver>,
}

impl<'a> Classifier<'a> {
    /// A classifier with no symbol resolution; every answer is textual
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self {
            registry,
            resolver: None,
        }
    }

    pub fn with_resolver(mut self, resolver: &'a dyn SymbolResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn registry(&self) -> &'a StyleRegistry {
        self.registry
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Style of `class`, using both tiers
    pub fn classify(&self, class: Node) -> Option<Classification> {
        let result = self.walk(class, self.registry.styles(), true);
        debug!(
            "Classified {:?} as {:?}",
            class_fq_name(class).unwrap_or_default(),
            result
        );
        result
    }

    /// Symbol tier only; `None` if any step of the chain is unresolved
    pub fn classify_resolved(&self, class: Node) -> Option<SpecStyle> {
        self.walk(class, self.registry.styles(), false)
            .map(|classification| classification.style)
    }

    /// Textual tier only: the written superclass against the styles' short names
    pub fn classify_textual(&self, class: Node) -> Option<SpecStyle> {
        let written = super_type_name(class)?;
        Self::match_short_name(&written, self.registry.styles())
    }

    pub fn resolve_style(&self, class: Node) -> Option<SpecStyle> {
        self.classify(class).map(|classification| classification.style)
    }

    pub fn is_specification(&self, class: Node) -> bool {
        self.classify(class).is_some()
    }

    /// The same walk as [`Classifier::classify`], narrowed to one style
    pub fn is_specification_of(&self, class: Node, style: SpecStyle) -> bool {
        self.walk(class, &[style], true).is_some()
    }

    /// Recognizes `node` with the style of the spec it sits in
    pub fn recognize(&self, node: Node) -> MatchResult<RecognizedTest> {
        let class = node.enclosing_class().ok_or(NoMatch::NotInSpec)?;
        let style = self.resolve_style(class).ok_or(NoMatch::NotInSpec)?;
        style.try_recognize(node, self)
    }

    /// Leaf entry point of [`Classifier::recognize`]
    ///
    /// Tokens that cannot start a shape of any registered style are rejected
    /// before the enclosing class is looked at.
    pub fn recognize_from_leaf(&self, leaf: Node) -> Option<RecognizedTest> {
        let is_candidate = self
            .registry
            .iter()
            .any(|style| style.strategy().candidate_for_leaf(leaf).is_some());
        if !is_candidate {
            return None;
        }
        let class = leaf.enclosing_class()?;
        let style = self.resolve_style(class)?;
        style.recognize_from_leaf(leaf, self)
    }

    fn walk(
        &self,
        class: Node,
        candidates: &[SpecStyle],
        textual_fallback: bool,
    ) -> Option<Classification> {
        let mut written = super_type_name(class)?;
        let mut context = ImportContext::of(class);
        let mut visited: HashSet<String> = class_fq_name(class).into_iter().collect();

        loop {
            let symbol = self
                .resolver
                .and_then(|resolver| resolver.resolve(&written, &context));
            let Some(symbol) = symbol else {
                if !textual_fallback {
                    return None;
                }
                debug!("Falling back to short name match for {}", written);
                return Self::match_short_name(&written, candidates).map(|style| {
                    Classification {
                        style,
                        confidence: Confidence::Textual,
                    }
                });
            };

            if let Some(style) = candidates
                .iter()
                .copied()
                .find(|style| style.fq_name() == symbol.fq_name)
            {
                return Some(Classification {
                    style,
                    confidence: Confidence::Resolved,
                });
            }
            if !visited.insert(symbol.fq_name.clone()) {
                warn!("Superclass cycle through {}", symbol.fq_name);
                return None;
            }
            written = symbol.super_type?;
            context = symbol.context;
        }
    }

    fn match_short_name(written: &str, candidates: &[SpecStyle]) -> Option<SpecStyle> {
        let name = short_name(written);
        candidates
            .iter()
            .copied()
            .find(|style| style.short_name() == name)
    }
}

impl SpecMembership for Classifier<'_> {
    fn is_specification_of(&self, class: Node, style: SpecStyle) -> bool {
        Classifier::is_specification_of(self, class, style)
    }
}
