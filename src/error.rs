//! Errors raised while compiling a filter.

use crate::token::TokenKind;
use std::fmt;
use thiserror::Error;

/// The set of token kinds that would have been accepted at some position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedKinds(pub Vec<TokenKind>);

impl From<&[TokenKind]> for ExpectedKinds {
    fn from(kinds: &[TokenKind]) -> Self {
        Self(kinds.to_vec())
    }
}

impl fmt::Display for ExpectedKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{}", kind)?;
        }
        Ok(())
    }
}

/// Errors that can occur when compiling a token sequence into a filter.
///
/// The messages are shown inline by the UI, so their wording is part of the
/// public contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Filter expression is incomplete")]
    ExpressionIncomplete,

    #[error("Missing operand")]
    MissingOperand,

    #[error("Expected {0} but reached the end of the filter")]
    MissingTokenAtEnd(ExpectedKinds),

    #[error("Expected {expected} but found {kind} '{value}'")]
    UnexpectedTokenKind {
        expected: ExpectedKinds,
        kind: TokenKind,
        value: String,
    },

    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("Unexpected {kind} '{value}' on the left of an operator, expected a channel")]
    UnexpectedLeftOperand { kind: TokenKind, value: String },

    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Unexpected token '{0}' after the end of the filter")]
    TrailingToken(String),

    #[error("Parentheses nested deeper than {0} levels")]
    NestingTooDeep(usize),
}
