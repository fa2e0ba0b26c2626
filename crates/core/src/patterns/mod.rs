//! Style-independent recognizers for the call shapes of test DSLs

pub mod call_shape;
pub mod leaf;
pub mod literal;

pub use call_shape::{
    function_name, is_dsl_invocation, match_dot_chained_config_on_function_call,
    match_function_call_with_string_and_trailing_lambda, match_string_receiver_config_chain,
    match_string_receiver_invoke_with_lambda, try_match_dot_chained_config_on_function_call,
    try_match_function_call_with_string_and_trailing_lambda,
    try_match_string_receiver_config_chain, try_match_string_receiver_invoke_with_lambda,
};
pub use literal::{escape_string_literal, string_literal_value};

/// Why a node was not recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoMatch {
    /// The node does not have the expected call structure
    Shape,
    /// The structure matches but the name is not a plain string literal
    Literal,
    /// The node matches but does not sit in a spec of the expected style
    NotInSpec,
}

impl NoMatch {
    /// The more informative of two reasons for the same node
    pub fn most_specific(self, other: NoMatch) -> NoMatch {
        match (self, other) {
            (NoMatch::Shape, other) => other,
            (this, _) => this,
        }
    }
}

pub type MatchResult<T> = std::result::Result<T, NoMatch>;
