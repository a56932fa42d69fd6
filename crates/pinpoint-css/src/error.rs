//! Selector parse errors.

use thiserror::Error;

/// Why a selector string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The input was empty or only whitespace.
    #[error("empty selector")]
    Empty,

    /// A character that cannot appear at this point of the grammar.
    #[error("unexpected {found:?} at offset {offset}")]
    UnexpectedChar {
        /// The offending character.
        found: char,
        /// Character offset into the selector string.
        offset: usize,
    },

    /// The input ended in the middle of a construct.
    #[error("unexpected end of selector, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// A combinator or comma with no compound selector on one side.
    #[error("dangling combinator at offset {offset}")]
    DanglingCombinator {
        /// Character offset of the combinator.
        offset: usize,
    },

    /// A pseudo-class or pseudo-element the matcher does not implement.
    #[error("unsupported pseudo-class :{0}")]
    UnsupportedPseudoClass(String),

    /// A malformed `An+B` argument.
    #[error("invalid An+B expression {0:?}")]
    InvalidNth(String),
}
