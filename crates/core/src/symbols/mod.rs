//! Class symbols and the resolver seam used by classification
//!
//! Resolution is optional. Without a [`SymbolResolver`] the classifier only
//! has the text of a supertype reference to go on.

pub mod project_index;

pub use project_index::{IndexOverlay, ProjectIndex};

use crate::syntax::{Node, NodeKind};
use std::borrow::Cow;

/// The package and imports a type name is written under
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportContext {
    /// Empty for the default package
    pub package: String,
    /// Imported paths as written, wildcard imports end in `.*`
    pub imports: Vec<String>,
}

impl ImportContext {
    /// Reads the package header and imports of a file
    pub fn of_file(file: Node) -> Self {
        let package = file
            .first_child_of(NodeKind::PackageHeader)
            .map(|header| header.text().into_owned())
            .unwrap_or_default();
        let imports = file
            .children_of(NodeKind::ImportDirective)
            .map(|import| import.text().into_owned())
            .collect();
        Self { package, imports }
    }

    /// Context of the file containing `node`
    pub fn of(node: Node) -> Self {
        let file = node.ancestors().last().unwrap_or(node);
        Self::of_file(file)
    }

    /// `name` qualified with this context's package
    pub fn qualify(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }

    /// Explicit import whose last segment is `name`
    pub fn explicit_import(&self, name: &str) -> Option<&str> {
        self.imports
            .iter()
            .map(String::as_str)
            .filter(|import| !import.ends_with(".*"))
            .find(|import| import.rsplit('.').next() == Some(name))
    }

    /// Packages imported with `.*`
    pub fn wildcard_packages(&self) -> impl Iterator<Item = &str> {
        self.imports
            .iter()
            .filter_map(|import| import.strip_suffix(".*"))
    }
}

/// A resolved class declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    pub fq_name: String,
    /// Superclass as written in the declaration, if known
    pub super_type: Option<String>,
    /// Context `super_type` must be resolved in
    pub context: ImportContext,
}

impl ClassSymbol {
    /// A symbol known only by name, e.g. a library class that is not indexed
    pub fn external(fq_name: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            super_type: None,
            context: ImportContext::default(),
        }
    }

    pub fn short_name(&self) -> &str {
        short_name(&self.fq_name)
    }
}

/// Resolves written type names to class symbols
pub trait SymbolResolver {
    /// Resolves `type_name` as written under `context`
    ///
    /// Returns `None` when the name cannot be resolved; callers treat that as
    /// degraded information, not as an error.
    fn resolve(&self, type_name: &str, context: &ImportContext) -> Option<ClassSymbol>;
}

/// The declared name of a class or object
pub fn class_name<'t>(class: Node<'t>) -> Option<Cow<'t, str>> {
    class
        .first_child_of(NodeKind::Identifier)
        .map(|identifier| identifier.text())
}

/// Fully-qualified name of a declaration, including enclosing classes
pub fn class_fq_name(class: Node) -> Option<String> {
    let mut names = vec![class_name(class)?.into_owned()];
    for outer in class.ancestors().filter(|node| node.kind().is_class_or_object()) {
        names.push(class_name(outer)?.into_owned());
    }
    names.reverse();
    Some(ImportContext::of(class).qualify(&names.join(".")))
}

/// The superclass reference of a declaration, as written
///
/// A constructor call entry (`Base()`) is the superclass; without one the
/// first plain entry is taken.
pub fn super_type_name(class: Node) -> Option<String> {
    let list = class.first_child_of(NodeKind::SuperTypeList)?;
    let entry = list
        .first_child_of(NodeKind::SuperTypeCallEntry)
        .or_else(|| list.first_child_of(NodeKind::SuperTypeEntry))?;
    let reference = entry.first_child_of(NodeKind::TypeReference)?;
    let name = reference.text();
    (!name.is_empty()).then(|| name.into_owned())
}

/// Last segment of a dotted name
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Builds the symbol for a declaration in a parsed file
pub fn declared_symbol(class: Node) -> Option<ClassSymbol> {
    Some(ClassSymbol {
        fq_name: class_fq_name(class)?,
        super_type: super_type_name(class),
        context: ImportContext::of(class),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::syntax::{NodeId, NodeKind, SyntaxTree};
    use crate::syntax::testing::*;

    /// `class name : super_type()`; returns `(class, class body)`
    pub fn class_extending(
        tree: &mut SyntaxTree,
        parent: NodeId,
        name: &str,
        super_type: &str,
    ) -> (NodeId, NodeId) {
        let class = node(tree, parent, NodeKind::ClassDeclaration);
        token(tree, class, NodeKind::Identifier, name);
        let list = node(tree, class, NodeKind::SuperTypeList);
        let entry = node(tree, list, NodeKind::SuperTypeCallEntry);
        token(tree, entry, NodeKind::TypeReference, super_type);
        let body = node(tree, class, NodeKind::ClassBody);
        (class, body)
    }
}
