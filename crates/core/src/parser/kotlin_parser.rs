use super::utils::{node_text, node_to_span};
use crate::{
    error::{Error, Result},
    syntax::{NodeId, NodeKind, SyntaxTree},
    types::Span,
};
use tracing::debug;
use tree_sitter::{Node, Parser};

const IDENTIFIER_KINDS: &[&str] = &["identifier", "simple_identifier", "type_identifier"];

/// Grammar wrappers whose children are lowered straight into the parent
const TRANSPARENT_KINDS: &[&str] = &[
    "statements",
    "statement",
    "call_suffix",
    "class_member_declarations",
    "import_list",
];

const COMMENT_KINDS: &[&str] = &[
    "comment",
    "line_comment",
    "multiline_comment",
    "block_comment",
    "shebang_line",
];

const STRING_KINDS: &[&str] = &[
    "string_literal",
    "line_string_literal",
    "multi_line_string_literal",
    "multiline_string_literal",
];

pub struct KotlinParser {
    parser: Parser,
}

impl KotlinParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin_ng::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    /// Parses Kotlin source into the raw tree-sitter tree
    pub fn parse_raw(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// Parses Kotlin source and lowers it into a [`SyntaxTree`]
    ///
    /// Source with syntax errors still produces a tree; incomplete constructs
    /// carry `Missing` tokens or sit under `Error` nodes.
    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree> {
        let raw = self.parse_raw(source)?;
        let root = raw.root_node();
        if root.has_error() {
            debug!("Kotlin source contains syntax errors");
        }
        let tree = Lowering::new(source, &root).run(root);
        debug!("Lowered Kotlin source into {} nodes", tree.len());
        Ok(tree)
    }
}

struct Lowering<'s> {
    source: &'s str,
    tree: SyntaxTree,
}

impl<'s> Lowering<'s> {
    fn new(source: &'s str, root: &Node) -> Self {
        Self {
            source,
            tree: SyntaxTree::new(NodeKind::File, node_to_span(root)),
        }
    }

    fn run(mut self, root: Node) -> SyntaxTree {
        let file = self.tree.root().id();
        self.lower_children(root, file);
        self.tree
    }

    fn lower_children(&mut self, node: Node, parent: NodeId) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.lower(child, parent);
        }
    }

    fn lower(&mut self, node: Node, parent: NodeId) {
        let kind = node.kind();
        let span = node_to_span(&node);

        if node.is_missing() {
            self.tree.add_leaf(parent, NodeKind::Missing, "", span);
            return;
        }
        if node.is_error() {
            let id = self.tree.add_node(parent, NodeKind::Error, span);
            self.lower_children(node, id);
            return;
        }
        if COMMENT_KINDS.contains(&kind) {
            return;
        }
        if !node.is_named() {
            self.lower_token(node, parent);
            return;
        }
        if TRANSPARENT_KINDS.contains(&kind) {
            self.lower_children(node, parent);
            return;
        }

        match kind {
            "source_file" => self.lower_children(node, parent),
            "package_header" => {
                let name = self.package_name(node);
                self.tree.add_leaf(parent, NodeKind::PackageHeader, name, span);
            }
            "import" | "import_header" => {
                let path = self.import_path(node);
                self.tree.add_leaf(parent, NodeKind::ImportDirective, path, span);
            }
            "class_declaration" => self.lower_class(node, parent, NodeKind::ClassDeclaration),
            "object_declaration" => self.lower_class(node, parent, NodeKind::ObjectDeclaration),
            "class_body" | "enum_class_body" => {
                self.lower_as(node, parent, NodeKind::ClassBody);
            }
            "anonymous_initializer" => self.lower_initializer(node, parent),
            "block" => {
                self.lower_as(node, parent, NodeKind::BlockExpression);
            }
            "call_expression" => self.lower_call(node, parent),
            "navigation_expression" => self.lower_navigation(node, parent),
            "value_arguments" => {
                self.lower_as(node, parent, NodeKind::ValueArgumentList);
            }
            "value_argument" => {
                self.lower_as(node, parent, NodeKind::ValueArgument);
            }
            "annotated_lambda" => {
                self.lower_as(node, parent, NodeKind::LambdaArgument);
            }
            "lambda_literal" => {
                self.lower_as(node, parent, NodeKind::LambdaExpression);
            }
            k if STRING_KINDS.contains(&k) => self.lower_string(node, parent),
            k if IDENTIFIER_KINDS.contains(&k) => self.lower_name_reference(node, parent),
            _ => {
                self.lower_as(node, parent, NodeKind::Other);
            }
        }
    }

    fn lower_as(&mut self, node: Node, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.tree.add_node(parent, kind, node_to_span(&node));
        self.lower_children(node, id);
        id
    }

    fn lower_token(&mut self, node: Node, parent: NodeId) {
        let text = node_text(&node, self.source);
        let kind = if text == "." {
            NodeKind::Dot
        } else {
            NodeKind::Punctuation
        };
        self.tree.add_leaf(parent, kind, text, node_to_span(&node));
    }

    fn lower_name_reference(&mut self, node: Node, parent: NodeId) {
        let span = node_to_span(&node);
        let reference = self.tree.add_node(parent, NodeKind::NameReference, span);
        let text = node_text(&node, self.source);
        self.tree.add_leaf(reference, NodeKind::Identifier, text, span);
    }

    fn lower_class(&mut self, node: Node, parent: NodeId, kind: NodeKind) {
        let class = self.tree.add_node(parent, kind, node_to_span(&node));
        let mut supertypes = None;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                k if child.is_named() && IDENTIFIER_KINDS.contains(&k) => {
                    let text = node_text(&child, self.source);
                    self.tree
                        .add_leaf(class, NodeKind::Identifier, text, node_to_span(&child));
                }
                "delegation_specifiers" => {
                    let mut inner = child.walk();
                    for specifier in child.named_children(&mut inner) {
                        if specifier.kind() == "delegation_specifier" {
                            let list = self.supertype_list(class, &mut supertypes, &child);
                            self.lower_supertype(specifier, list);
                        }
                    }
                }
                "delegation_specifier" => {
                    let list = self.supertype_list(class, &mut supertypes, &child);
                    self.lower_supertype(child, list);
                }
                _ => self.lower(child, class),
            }
        }
    }

    fn supertype_list(&mut self, class: NodeId, list: &mut Option<NodeId>, at: &Node) -> NodeId {
        *list.get_or_insert_with(|| {
            self.tree
                .add_node(class, NodeKind::SuperTypeList, node_to_span(at))
        })
    }

    fn lower_supertype(&mut self, specifier: Node, list: NodeId) {
        let span = node_to_span(&specifier);
        let invocation = find_descendant(specifier, "constructor_invocation");
        let (kind, user_type) = match invocation {
            Some(invocation) => (
                NodeKind::SuperTypeCallEntry,
                find_descendant(invocation, "user_type"),
            ),
            None => (
                NodeKind::SuperTypeEntry,
                find_descendant(specifier, "user_type"),
            ),
        };
        let Some(user_type) = user_type else {
            return;
        };
        let entry = self.tree.add_node(list, kind, span);
        let name = self.type_name(user_type);
        self.tree
            .add_leaf(entry, NodeKind::TypeReference, name, node_to_span(&user_type));

        // `Spec({ ... })` carries the spec body as a constructor argument
        if let Some(arguments) = invocation.and_then(|i| find_descendant(i, "value_arguments")) {
            self.lower(arguments, entry);
        }
    }

    fn lower_initializer(&mut self, node: Node, parent: NodeId) {
        let span = node_to_span(&node);
        let init = self.tree.add_node(parent, NodeKind::ClassInitializer, span);
        let mut cursor = node.walk();
        let has_block = node
            .named_children(&mut cursor)
            .any(|child| child.kind() == "block");

        if has_block {
            self.lower_children(node, init);
        } else {
            let block = self.tree.add_node(init, NodeKind::BlockExpression, span);
            self.lower_children(node, block);
        }
    }

    fn lower_call(&mut self, node: Node, parent: NodeId) {
        let parts = call_parts(node);

        let Some(callee_index) = parts.iter().position(|part| part.is_named()) else {
            self.lower_as(node, parent, NodeKind::CallExpression);
            return;
        };
        let callee = parts[callee_index];
        let rest = &parts[callee_index + 1..];

        // `receiver.name(args) { }` becomes a dotted access whose selector is the call
        if callee.kind() == "navigation_expression" && is_plain_dot(callee, self.source) {
            let dot = self
                .tree
                .add_node(parent, NodeKind::DotQualifiedExpression, node_to_span(&node));
            self.lower_receiver_and_dot(callee, dot);

            let selector = selector_identifier(callee);
            let start = selector
                .map(|s| node_to_span(&s).start)
                .unwrap_or_else(|| node_to_span(&node).start);
            let call_span = Span::new(start, node_to_span(&node).end);
            let call = self.tree.add_node(dot, NodeKind::CallExpression, call_span);
            if let Some(selector) = selector {
                self.lower_name_reference(selector, call);
            }
            for part in rest {
                self.lower(*part, call);
            }
            return;
        }

        let call = self
            .tree
            .add_node(parent, NodeKind::CallExpression, node_to_span(&node));
        for part in &parts[..callee_index] {
            self.lower(*part, call);
        }
        self.lower(callee, call);
        for part in rest {
            self.lower(*part, call);
        }
    }

    fn lower_navigation(&mut self, node: Node, parent: NodeId) {
        if !is_plain_dot(node, self.source) {
            self.lower_as(node, parent, NodeKind::Other);
            return;
        }
        let dot = self
            .tree
            .add_node(parent, NodeKind::DotQualifiedExpression, node_to_span(&node));
        self.lower_receiver_and_dot(node, dot);
        if let Some(selector) = selector_identifier(node) {
            self.lower_name_reference(selector, dot);
        }
    }

    fn lower_receiver_and_dot(&mut self, navigation: Node, dot: NodeId) {
        if let Some(receiver) = navigation.named_child(0) {
            self.lower(receiver, dot);
        }
        if let Some(separator) = find_dot_token(navigation, self.source) {
            self.tree
                .add_leaf(dot, NodeKind::Dot, ".", node_to_span(&separator));
        }
    }

    fn lower_string(&mut self, node: Node, parent: NodeId) {
        let template = self
            .tree
            .add_node(parent, NodeKind::StringTemplate, node_to_span(&node));
        let count = node.child_count();

        let mut cursor = node.walk();
        for (index, child) in node.children(&mut cursor).enumerate() {
            let span = node_to_span(&child);
            let text = node_text(&child, self.source);
            let kind = child.kind();

            if child.is_missing() {
                self.tree.add_leaf(template, NodeKind::Missing, "", span);
            } else if !child.is_named() && text.starts_with('"') {
                let kind = if index == 0 {
                    NodeKind::OpenQuote
                } else if index + 1 == count {
                    NodeKind::ClosingQuote
                } else {
                    NodeKind::TemplateEntry
                };
                self.tree.add_leaf(template, kind, text, span);
            } else if !child.is_named() {
                self.tree
                    .add_leaf(template, NodeKind::TemplateEntry, text, span);
            } else if kind.contains("escape") {
                self.tree
                    .add_leaf(template, NodeKind::EscapeStringEntry, text, span);
            } else if kind.contains("content") || kind.ends_with("text") {
                self.lower_string_content(child, template);
            } else {
                self.lower_as(child, template, NodeKind::TemplateEntry);
            }
        }
    }

    /// Splits a content node into literal runs and the escape sequences nested in it
    fn lower_string_content(&mut self, node: Node, template: NodeId) {
        let mut position = node.start_byte();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if !child.kind().contains("escape") {
                continue;
            }
            self.add_literal_run(template, position, child.start_byte(), &node);
            let text = node_text(&child, self.source);
            self.tree
                .add_leaf(template, NodeKind::EscapeStringEntry, text, node_to_span(&child));
            position = child.end_byte();
        }
        self.add_literal_run(template, position, node.end_byte(), &node);
    }

    /// Adds the source text in `start..end` as literal runs, splitting out
    /// `$name` templates the grammar leaves inside plain content
    fn add_literal_run(&mut self, template: NodeId, start: usize, end: usize, owner: &Node) {
        if start >= end {
            return;
        }
        let Some(text) = self.source.get(start..end) else {
            return;
        };
        let span = node_to_span(owner);

        let mut literal_start = 0;
        let mut chars = text.char_indices().peekable();
        while let Some((index, c)) = chars.next() {
            if c != '$' || text[..index].ends_with('\\') {
                continue;
            }
            // A `$` closing the run may start a template split across content nodes
            let next = match chars.peek() {
                Some(&(_, next)) => Some(next),
                None => self.source.get(end..).and_then(|rest| rest.chars().next()),
            };
            if !next.is_some_and(starts_template) {
                continue;
            }

            let mut template_end = index + c.len_utf8();
            while let Some(&(next_index, next)) = chars.peek() {
                if !(next.is_alphanumeric() || next == '_' || next == '`') {
                    break;
                }
                template_end = next_index + next.len_utf8();
                chars.next();
            }
            if literal_start < index {
                self.tree.add_leaf(
                    template,
                    NodeKind::LiteralStringEntry,
                    &text[literal_start..index],
                    span,
                );
            }
            self.tree
                .add_leaf(template, NodeKind::TemplateEntry, &text[index..template_end], span);
            literal_start = template_end;
        }
        if literal_start < text.len() {
            self.tree
                .add_leaf(template, NodeKind::LiteralStringEntry, &text[literal_start..], span);
        }
    }

    fn package_name(&self, node: Node) -> String {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "qualified_identifier" || child.kind() == "identifier")
            .map(|child| node_text(&child, self.source))
            .unwrap_or_else(|| {
                node_text(&node, self.source)
                    .trim_start()
                    .trim_start_matches("package")
            });
        strip_whitespace(name)
    }

    fn import_path(&self, node: Node) -> String {
        let text = node_text(&node, self.source)
            .trim_start()
            .trim_start_matches("import");
        let without_alias = text.split(" as ").next().unwrap_or(text);
        strip_whitespace(without_alias.trim_end_matches(';'))
    }

    /// Dotted name of a user type, ignoring type arguments
    fn type_name(&self, user_type: Node) -> String {
        let mut segments = Vec::new();
        collect_identifiers(user_type, self.source, &mut segments);
        segments.join(".")
    }
}

/// Children of a call with call suffixes flattened
///
/// `f(args) { }` nested as a call of a call is merged into one part list so
/// the trailing lambda sits next to its argument list.
fn call_parts(node: Node) -> Vec<Node> {
    let mut parts = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "call_suffix" {
            let mut inner = child.walk();
            parts.extend(child.children(&mut inner));
        } else {
            parts.push(child);
        }
    }

    let Some(callee_index) = parts.iter().position(|part| part.is_named()) else {
        return parts;
    };
    let callee = parts[callee_index];
    let only_lambdas = parts[callee_index + 1..]
        .iter()
        .filter(|part| part.is_named())
        .all(|part| part.kind() == "annotated_lambda");
    if callee.kind() == "call_expression" && only_lambdas && callee_index + 1 < parts.len() {
        let inner = call_parts(callee);
        let inner_has_lambda = inner.iter().any(|part| part.kind() == "annotated_lambda");
        let inner_has_arguments = inner.iter().any(|part| part.kind() == "value_arguments");
        if inner_has_arguments && !inner_has_lambda {
            let mut merged = parts[..callee_index].to_vec();
            merged.extend(inner);
            merged.extend_from_slice(&parts[callee_index + 1..]);
            return merged;
        }
    }
    parts
}

fn starts_template(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '`' || c == '{'
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn collect_identifiers<'s>(node: Node, source: &'s str, segments: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "type_arguments" | "type_projection" => {}
            k if IDENTIFIER_KINDS.contains(&k) => segments.push(node_text(&child, source)),
            _ => collect_identifiers(child, source, segments),
        }
    }
}

fn find_descendant<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    if let Some(found) = children.iter().find(|child| child.kind() == kind) {
        return Some(*found);
    }
    children
        .into_iter()
        .find_map(|child| find_descendant(child, kind))
}

/// The `.` separating receiver and selector, looking inside a navigation suffix if present
fn find_dot_token<'t>(navigation: Node<'t>, source: &str) -> Option<Node<'t>> {
    let mut cursor = navigation.walk();
    let children: Vec<Node<'t>> = navigation.children(&mut cursor).collect();
    for child in children {
        if !child.is_named() && node_text(&child, source) == "." {
            return Some(child);
        }
        if child.kind() == "navigation_suffix" {
            let mut inner = child.walk();
            let dot = child
                .children(&mut inner)
                .find(|token| !token.is_named() && node_text(token, source) == ".");
            if dot.is_some() {
                return dot;
            }
        }
    }
    None
}

fn is_plain_dot(navigation: Node, source: &str) -> bool {
    find_dot_token(navigation, source).is_some()
}

fn selector_identifier(navigation: Node) -> Option<Node> {
    let count = navigation.named_child_count();
    if count < 2 {
        return None;
    }
    let last = navigation.named_child(count - 1)?;
    let selector = if last.kind() == "navigation_suffix" {
        let inner = last.named_child_count();
        last.named_child(inner.checked_sub(1)?)?
    } else {
        last
    };
    IDENTIFIER_KINDS
        .contains(&selector.kind())
        .then_some(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Node as SyntaxNode;

    fn find(tree: &SyntaxTree, kind: NodeKind) -> Vec<SyntaxNode<'_>> {
        tree.root()
            .descendants()
            .filter(|node| node.kind() == kind)
            .collect()
    }

    #[test]
    fn test_parser_creation() {
        let parser = KotlinParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn test_parse_empty_source() {
        let mut parser = KotlinParser::new().unwrap();
        let tree = parser.parse("").unwrap();
        assert_eq!(tree.root().kind(), NodeKind::File);
    }

    #[test]
    fn test_package_and_imports() {
        let mut parser = KotlinParser::new().unwrap();
        let source = r#"
package com.example.specs

import io.kotest.core.spec.style.StringSpec
import io.kotest.matchers.*
"#;
        let tree = parser.parse(source).unwrap();

        let package = find(&tree, NodeKind::PackageHeader);
        assert_eq!(package.len(), 1);
        assert_eq!(package[0].text(), "com.example.specs");

        let imports: Vec<_> = find(&tree, NodeKind::ImportDirective)
            .into_iter()
            .map(|node| node.text().into_owned())
            .collect();
        assert_eq!(
            imports,
            vec!["io.kotest.core.spec.style.StringSpec", "io.kotest.matchers.*"]
        );
    }

    #[test]
    fn test_class_supertype_is_lowered() {
        let mut parser = KotlinParser::new().unwrap();
        let source = r#"
class MySpec : io.kotest.core.spec.style.StringSpec(), Cloneable {
}
"#;
        let tree = parser.parse(source).unwrap();

        let classes = find(&tree, NodeKind::ClassDeclaration);
        assert_eq!(classes.len(), 1);
        let name = classes[0].first_child_of(NodeKind::Identifier).unwrap();
        assert_eq!(name.text(), "MySpec");

        let call_entries = find(&tree, NodeKind::SuperTypeCallEntry);
        assert_eq!(call_entries.len(), 1);
        let reference = call_entries[0]
            .first_child_of(NodeKind::TypeReference)
            .unwrap();
        assert_eq!(reference.text(), "io.kotest.core.spec.style.StringSpec");

        let plain_entries = find(&tree, NodeKind::SuperTypeEntry);
        assert_eq!(plain_entries.len(), 1);
    }

    #[test]
    fn test_constructor_lambda_is_kept() {
        let mut parser = KotlinParser::new().unwrap();
        let source = r#"
class MySpec : FunSpec({
    test("works") { }
})
"#;
        let tree = parser.parse(source).unwrap();

        let entry = find(&tree, NodeKind::SuperTypeCallEntry)[0];
        assert!(entry.first_child_of(NodeKind::ValueArgumentList).is_some());
        let names: Vec<_> = entry
            .descendants()
            .filter(|n| n.is(NodeKind::NameReference))
            .map(|n| n.text().into_owned())
            .collect();
        assert!(names.contains(&"test".to_string()));
    }

    #[test]
    fn test_string_invocation_in_initializer() {
        let mut parser = KotlinParser::new().unwrap();
        let source = r#"
class MySpec : StringSpec() {
    init {
        "adds numbers" { }
    }
}
"#;
        let tree = parser.parse(source).unwrap();

        let blocks = find(&tree, NodeKind::BlockExpression);
        assert!(!blocks.is_empty());
        let block = blocks[0];
        assert_eq!(block.parent().unwrap().kind(), NodeKind::ClassInitializer);

        let call = block.first_child_of(NodeKind::CallExpression).unwrap();
        let kinds: Vec<_> = call.elements().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::StringTemplate, NodeKind::LambdaArgument]);
    }

    #[test]
    fn test_config_chain_becomes_dot_qualified_call() {
        let mut parser = KotlinParser::new().unwrap();
        let source = r#"
fun f() {
    "slow".config(timeout = 5) { }
}
"#;
        let tree = parser.parse(source).unwrap();

        let dots = find(&tree, NodeKind::DotQualifiedExpression);
        assert_eq!(dots.len(), 1);
        let elements: Vec<_> = dots[0].elements().collect();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind(), NodeKind::StringTemplate);
        assert_eq!(elements[1].kind(), NodeKind::CallExpression);
        assert!(dots[0].first_child_of(NodeKind::Dot).is_some());

        let selector = elements[1].first_element().unwrap();
        assert_eq!(selector.kind(), NodeKind::NameReference);
        assert_eq!(selector.text(), "config");
    }

    #[test]
    fn test_simple_name_template_is_not_literal_text() {
        let mut parser = KotlinParser::new().unwrap();
        let source = r#"
fun f() {
    test("v $x") { }
}
"#;
        let tree = parser.parse(source).unwrap();

        let template = find(&tree, NodeKind::StringTemplate)[0];
        assert!(template.first_child_of(NodeKind::TemplateEntry).is_some());
        let call = find(&tree, NodeKind::CallExpression)[0];
        assert_eq!(
            crate::patterns::try_match_function_call_with_string_and_trailing_lambda(call, "test"),
            Err(crate::patterns::NoMatch::Literal)
        );
    }

    #[test]
    fn test_lone_dollar_stays_literal() {
        let mut parser = KotlinParser::new().unwrap();
        let source = r#"
fun f() {
    test("costs $ 5") { }
}
"#;
        let tree = parser.parse(source).unwrap();

        let template = find(&tree, NodeKind::StringTemplate)[0];
        assert!(template.first_child_of(NodeKind::TemplateEntry).is_none());
        assert_eq!(
            crate::patterns::string_literal_value(template),
            Ok("costs $ 5".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_syntax() {
        let mut parser = KotlinParser::new().unwrap();
        // Tree-sitter still parses invalid syntax, creating error nodes
        let tree = parser.parse("class A { init { context( } }");
        assert!(tree.is_ok());
    }
}
