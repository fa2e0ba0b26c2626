use super::{MatchResult, NoMatch};
use crate::syntax::{Node, NodeKind};

/// Extracts the value of a plain string literal
///
/// The literal must be terminated and may only hold literal text and escape
/// sequences. Templates (`$name`, `${expr}`) are rejected with
/// [`NoMatch::Literal`]; anything that is not a string at all is a
/// [`NoMatch::Shape`].
pub fn string_literal_value(node: Node) -> MatchResult<String> {
    if !node.is(NodeKind::StringTemplate) {
        return Err(NoMatch::Shape);
    }
    let terminated = node.first_child_of(NodeKind::OpenQuote).is_some()
        && node.first_child_of(NodeKind::ClosingQuote).is_some()
        && !node.has_missing_child();
    if !terminated {
        return Err(NoMatch::Literal);
    }

    let mut value = String::new();
    for child in node.children() {
        match child.kind() {
            NodeKind::OpenQuote | NodeKind::ClosingQuote => {}
            NodeKind::LiteralStringEntry => value.push_str(&child.text()),
            NodeKind::EscapeStringEntry => value.push(unescape(&child.text())?),
            _ => return Err(NoMatch::Literal),
        }
    }
    Ok(value)
}

/// Escapes `value` for use between the quotes of a Kotlin string literal
pub fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn unescape(escape: &str) -> MatchResult<char> {
    let body = escape.strip_prefix('\\').ok_or(NoMatch::Literal)?;
    match body {
        "t" => Ok('\t'),
        "b" => Ok('\u{8}'),
        "n" => Ok('\n'),
        "r" => Ok('\r'),
        "'" => Ok('\''),
        "\"" => Ok('"'),
        "\\" => Ok('\\'),
        "$" => Ok('$'),
        _ => {
            let hex = body.strip_prefix('u').ok_or(NoMatch::Literal)?;
            if hex.len() != 4 {
                return Err(NoMatch::Literal);
            }
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or(NoMatch::Literal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::testing::*;

    #[test]
    fn test_plain_literal() {
        let mut tree = file();
        let root = tree.root().id();
        let id = string(&mut tree, root, "a test");
        let node = tree.node(id).unwrap();
        assert_eq!(string_literal_value(node), Ok("a test".to_string()));
    }

    #[test]
    fn test_escapes_are_decoded() {
        let mut tree = file();
        let root = tree.root().id();
        let template = node(&mut tree, root, NodeKind::StringTemplate);
        token(&mut tree, template, NodeKind::OpenQuote, "\"");
        token(&mut tree, template, NodeKind::LiteralStringEntry, "say ");
        token(&mut tree, template, NodeKind::EscapeStringEntry, "\\\"");
        token(&mut tree, template, NodeKind::LiteralStringEntry, "hi");
        token(&mut tree, template, NodeKind::EscapeStringEntry, "\\u0021");
        token(&mut tree, template, NodeKind::ClosingQuote, "\"");

        let node = tree.node(template).unwrap();
        assert_eq!(string_literal_value(node), Ok("say \"hi!".to_string()));
    }

    #[test]
    fn test_template_entry_is_literal_mismatch() {
        let mut tree = file();
        let root = tree.root().id();
        let template = node(&mut tree, root, NodeKind::StringTemplate);
        token(&mut tree, template, NodeKind::OpenQuote, "\"");
        token(&mut tree, template, NodeKind::LiteralStringEntry, "value is ");
        token(&mut tree, template, NodeKind::TemplateEntry, "$x");
        token(&mut tree, template, NodeKind::ClosingQuote, "\"");

        let node = tree.node(template).unwrap();
        assert_eq!(string_literal_value(node), Err(NoMatch::Literal));
    }

    #[test]
    fn test_unterminated_literal_is_rejected() {
        let mut tree = file();
        let root = tree.root().id();
        let template = node(&mut tree, root, NodeKind::StringTemplate);
        token(&mut tree, template, NodeKind::OpenQuote, "\"");
        token(&mut tree, template, NodeKind::LiteralStringEntry, "still typing");
        token(&mut tree, template, NodeKind::Missing, "");

        let node = tree.node(template).unwrap();
        assert_eq!(string_literal_value(node), Err(NoMatch::Literal));
    }

    #[test]
    fn test_escape_string_literal() {
        assert_eq!(escape_string_literal("plain"), "plain");
        assert_eq!(
            escape_string_literal("say \"hi\" \\ $x\n"),
            "say \\\"hi\\\" \\\\ \\$x\\n"
        );
    }

    #[test]
    fn test_non_string_is_shape_mismatch() {
        let mut tree = file();
        let root = tree.root().id();
        let id = name_ref(&mut tree, root, "x");
        let node = tree.node(id).unwrap();
        assert_eq!(string_literal_value(node), Err(NoMatch::Shape));
    }
}
