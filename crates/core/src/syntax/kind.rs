use serde::Serialize;

/// Node kinds of the lowered syntax tree
///
/// The structural kinds mirror the Kotlin PSI shapes the recognizers look at.
/// Token kinds are leaves and never count as structural children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    File,
    PackageHeader,
    ImportDirective,
    ClassDeclaration,
    ObjectDeclaration,
    SuperTypeList,
    /// `Base(...)` in a supertype list
    SuperTypeCallEntry,
    /// `Base` without a constructor call
    SuperTypeEntry,
    TypeReference,
    ClassBody,
    ClassInitializer,
    BlockExpression,
    CallExpression,
    DotQualifiedExpression,
    NameReference,
    ValueArgumentList,
    ValueArgument,
    /// Trailing lambda attached to a call
    LambdaArgument,
    LambdaExpression,
    StringTemplate,
    LiteralStringEntry,
    EscapeStringEntry,
    /// `$name` or `${expr}` inside a string
    TemplateEntry,
    Identifier,
    OpenQuote,
    ClosingQuote,
    Dot,
    Punctuation,
    /// Placeholder the parser inserted for a token the source lacks
    Missing,
    Error,
    Other,
}

impl NodeKind {
    pub fn is_token(self) -> bool {
        matches!(
            self,
            NodeKind::Identifier
                | NodeKind::OpenQuote
                | NodeKind::ClosingQuote
                | NodeKind::Dot
                | NodeKind::Punctuation
                | NodeKind::Missing
        )
    }

    pub fn is_class_or_object(self) -> bool {
        matches!(self, NodeKind::ClassDeclaration | NodeKind::ObjectDeclaration)
    }
}
