use super::{ClassSymbol, ImportContext, SymbolResolver, declared_symbol, short_name};
use crate::error::Result;
use crate::parser::KotlinParser;
use crate::syntax::{Node, SyntaxTree};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Class declarations of a set of parsed files
///
/// Resolves written names the way Kotlin imports do, as far as that is
/// possible without a compiler:
/// qualified names, explicit imports, same-package classes and wildcard
/// imports of indexed packages. Explicit imports of classes outside the index
/// still resolve, to a symbol with no known superclass.
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    classes: HashMap<String, ClassSymbol>,
}

impl ProjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, fq_name: &str) -> Option<&ClassSymbol> {
        self.classes.get(fq_name)
    }

    pub fn insert(&mut self, symbol: ClassSymbol) {
        self.classes.insert(symbol.fq_name.clone(), symbol);
    }

    /// Indexes every class and object declared in `tree`, nested ones included
    pub fn add_tree(&mut self, tree: &SyntaxTree) -> usize {
        let symbols: Vec<ClassSymbol> = tree
            .root()
            .descendants()
            .filter(|node| node.kind().is_class_or_object())
            .filter_map(declared_symbol)
            .collect();
        let count = symbols.len();
        for symbol in symbols {
            self.insert(symbol);
        }
        count
    }

    pub fn add_source(&mut self, parser: &mut KotlinParser, source: &str) -> Result<usize> {
        let tree = parser.parse(source)?;
        Ok(self.add_tree(&tree))
    }

    pub fn add_file(&mut self, parser: &mut KotlinParser, path: &Path) -> Result<usize> {
        let source = std::fs::read_to_string(path)?;
        let count = self.add_source(parser, &source)?;
        debug!("Indexed {} classes from {:?}", count, path);
        Ok(count)
    }

    /// Resolves the superclass of a declaration in its own file
    pub fn resolve_super_of(&self, class: Node) -> Option<ClassSymbol> {
        let written = super::super_type_name(class)?;
        self.resolve(&written, &ImportContext::of(class))
    }
}

/// Declarations a resolver can look up by fully-qualified name
trait Declarations {
    fn declared(&self, fq_name: &str) -> Option<&ClassSymbol>;
}

impl Declarations for ProjectIndex {
    fn declared(&self, fq_name: &str) -> Option<&ClassSymbol> {
        self.classes.get(fq_name)
    }
}

/// One file's declarations layered over a shared [`ProjectIndex`]
///
/// Built per query so the file's current content shadows whatever the shared
/// index holds, and nothing of it outlives the query.
#[derive(Debug)]
pub struct IndexOverlay<'a> {
    base: Option<&'a ProjectIndex>,
    local: ProjectIndex,
}

impl<'a> IndexOverlay<'a> {
    pub fn new(base: Option<&'a ProjectIndex>, tree: &SyntaxTree) -> Self {
        let mut local = ProjectIndex::new();
        local.add_tree(tree);
        Self { base, local }
    }

    pub fn local(&self) -> &ProjectIndex {
        &self.local
    }
}

impl Declarations for IndexOverlay<'_> {
    fn declared(&self, fq_name: &str) -> Option<&ClassSymbol> {
        self.local
            .declared(fq_name)
            .or_else(|| self.base.and_then(|base| base.declared(fq_name)))
    }
}

fn indexed(declarations: &impl Declarations, fq_name: &str) -> Option<ClassSymbol> {
    declarations.declared(fq_name).cloned()
}

fn resolve_qualified(
    declarations: &impl Declarations,
    name: &str,
    context: &ImportContext,
) -> Option<ClassSymbol> {
    if let Some(symbol) = indexed(declarations, name) {
        return Some(symbol);
    }
    let (head, rest) = name.split_once('.')?;
    if head.starts_with(|c: char| c.is_lowercase()) {
        // Package-qualified reference to a class outside the index
        return Some(ClassSymbol::external(name));
    }
    // `Outer.Inner` with `Outer` resolved through the context
    let outer = resolve_simple(declarations, head, context)?;
    let fq_name = format!("{}.{}", outer.fq_name, rest);
    Some(indexed(declarations, &fq_name).unwrap_or_else(|| ClassSymbol::external(fq_name)))
}

fn resolve_simple(
    declarations: &impl Declarations,
    name: &str,
    context: &ImportContext,
) -> Option<ClassSymbol> {
    if let Some(import) = context.explicit_import(name) {
        return Some(indexed(declarations, import).unwrap_or_else(|| ClassSymbol::external(import)));
    }
    if let Some(symbol) = indexed(declarations, &context.qualify(name)) {
        return Some(symbol);
    }
    context
        .wildcard_packages()
        .find_map(|package| indexed(declarations, &format!("{package}.{name}")))
}

fn resolve_in(
    declarations: &impl Declarations,
    type_name: &str,
    context: &ImportContext,
) -> Option<ClassSymbol> {
    let resolved = if type_name.contains('.') {
        resolve_qualified(declarations, type_name, context)
    } else {
        resolve_simple(declarations, type_name, context)
    };
    match &resolved {
        Some(symbol) => trace!("Resolved {} to {}", type_name, symbol.fq_name),
        None => trace!(
            "Could not resolve {} ({}) in package {:?}",
            type_name,
            short_name(type_name),
            context.package
        ),
    }
    resolved
}

impl SymbolResolver for ProjectIndex {
    fn resolve(&self, type_name: &str, context: &ImportContext) -> Option<ClassSymbol> {
        resolve_in(self, type_name, context)
    }
}

impl SymbolResolver for IndexOverlay<'_> {
    fn resolve(&self, type_name: &str, context: &ImportContext) -> Option<ClassSymbol> {
        resolve_in(self, type_name, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(package: &str, imports: &[&str]) -> ImportContext {
        ImportContext {
            package: package.to_string(),
            imports: imports.iter().map(|i| i.to_string()).collect(),
        }
    }

    fn symbol(fq_name: &str, super_type: Option<&str>, context: ImportContext) -> ClassSymbol {
        ClassSymbol {
            fq_name: fq_name.to_string(),
            super_type: super_type.map(str::to_string),
            context,
        }
    }

    fn index() -> ProjectIndex {
        let mut index = ProjectIndex::new();
        index.insert(symbol(
            "com.example.base.BaseSpec",
            Some("StringSpec"),
            context("com.example.base", &["io.kotest.core.spec.style.StringSpec"]),
        ));
        index.insert(symbol(
            "com.example.Helper",
            None,
            context("com.example", &[]),
        ));
        index
    }

    #[test]
    fn test_explicit_import_of_library_class() {
        let index = index();
        let ctx = context("com.example", &["io.kotest.core.spec.style.FunSpec"]);
        let resolved = index.resolve("FunSpec", &ctx).unwrap();
        assert_eq!(resolved.fq_name, "io.kotest.core.spec.style.FunSpec");
        assert_eq!(resolved.super_type, None);
    }

    #[test]
    fn test_same_package_and_wildcard() {
        let index = index();
        let ctx = context("com.example", &["com.example.base.*"]);

        assert_eq!(
            index.resolve("Helper", &ctx).map(|s| s.fq_name),
            Some("com.example.Helper".to_string())
        );
        let base = index.resolve("BaseSpec", &ctx).unwrap();
        assert_eq!(base.fq_name, "com.example.base.BaseSpec");
        assert_eq!(base.super_type.as_deref(), Some("StringSpec"));
    }

    #[test]
    fn test_qualified_names() {
        let index = index();
        let ctx = context("other", &[]);

        assert_eq!(
            index
                .resolve("io.kotest.core.spec.style.StringSpec", &ctx)
                .map(|s| s.fq_name),
            Some("io.kotest.core.spec.style.StringSpec".to_string())
        );
        assert!(index.resolve("com.example.base.BaseSpec", &ctx).unwrap().super_type.is_some());
    }

    #[test]
    fn test_unknown_names_are_unresolved() {
        let index = index();
        let ctx = context("com.example", &["io.kotest.matchers.*"]);
        assert!(index.resolve("StringSpec", &ctx).is_none());
        assert!(index.resolve("Outer.Inner", &ctx).is_none());
    }

    #[test]
    fn test_overlay_shadows_base_and_leaves_it_untouched() {
        let base = index();
        let mut parser = KotlinParser::new().unwrap();
        let tree = parser
            .parse("package com.example\n\nclass Helper : Base()\nclass Local\n")
            .unwrap();
        let overlay = IndexOverlay::new(Some(&base), &tree);
        let ctx = context("com.example", &["com.example.base.*"]);

        let helper = overlay.resolve("Helper", &ctx).unwrap();
        assert_eq!(helper.super_type.as_deref(), Some("Base"));
        assert!(overlay.resolve("Local", &ctx).is_some());
        assert!(overlay.resolve("BaseSpec", &ctx).is_some());

        assert_eq!(overlay.local().len(), 2);
        assert!(base.get("com.example.Local").is_none());
        assert_eq!(base.get("com.example.Helper").unwrap().super_type, None);
    }
}
