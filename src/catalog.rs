//! The operator catalog shared with the token producer.
//!
//! The autocomplete control offers exactly these spellings, and the parser
//! re-validates every operator token against the same table.

use crate::error::FilterError;
use crate::token::{Token, TokenKind};
use serde::Serialize;

/// Bumped whenever an entry is added, removed or re-spelled.
pub const CATALOG_VERSION: u32 = 1;

/// Operator emitted into the compiled filter document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompiledOp {
    #[serde(rename = "$eq")]
    Eq,
    #[serde(rename = "$ne")]
    Ne,
    #[serde(rename = "$lt")]
    Lt,
    #[serde(rename = "$gt")]
    Gt,
    #[serde(rename = "$lte")]
    Lte,
    #[serde(rename = "$gte")]
    Gte,
}

impl CompiledOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompiledOp::Eq => "$eq",
            CompiledOp::Ne => "$ne",
            CompiledOp::Lt => "$lt",
            CompiledOp::Gt => "$gt",
            CompiledOp::Lte => "$lte",
            CompiledOp::Gte => "$gte",
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    /// Spelling as offered to the user and carried in `Token::value`.
    pub label: &'static str,
    pub category: TokenKind,
    /// `None` for keywords and punctuation, which shape the tree instead.
    pub compiled: Option<CompiledOp>,
}

impl Operator {
    const fn new(label: &'static str, category: TokenKind, compiled: Option<CompiledOp>) -> Self {
        Self {
            label,
            category,
            compiled,
        }
    }

    pub fn token(&self) -> Token {
        Token::new(self.category, self.label)
    }
}

pub static OPERATORS: &[Operator] = &[
    Operator::new("not", TokenKind::Not, None),
    Operator::new("and", TokenKind::And, None),
    Operator::new("or", TokenKind::Or, None),
    Operator::new("(", TokenKind::OpenParen, None),
    Operator::new(")", TokenKind::CloseParen, None),
    Operator::new("=", TokenKind::ComparisonOp, Some(CompiledOp::Eq)),
    Operator::new("!=", TokenKind::ComparisonOp, Some(CompiledOp::Ne)),
    Operator::new("<", TokenKind::ComparisonOp, Some(CompiledOp::Lt)),
    Operator::new(">", TokenKind::ComparisonOp, Some(CompiledOp::Gt)),
    Operator::new("<=", TokenKind::ComparisonOp, Some(CompiledOp::Lte)),
    Operator::new(">=", TokenKind::ComparisonOp, Some(CompiledOp::Gte)),
    Operator::new("is null", TokenKind::UnaryOp, Some(CompiledOp::Eq)),
    Operator::new("is not null", TokenKind::UnaryOp, Some(CompiledOp::Ne)),
];

/// Catalog contents in the shape handed to the token producer.
#[derive(Debug, Serialize)]
pub struct CatalogSnapshot {
    pub version: u32,
    pub operators: &'static [Operator],
}

pub fn snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        version: CATALOG_VERSION,
        operators: OPERATORS,
    }
}

/// Exact-spelling lookup restricted to one category.
pub fn lookup(label: &str, category: TokenKind) -> Option<&'static Operator> {
    OPERATORS
        .iter()
        .find(|op| op.category == category && op.label == label)
}

/// Maps a comparison or unary operator token to its compiled operator.
pub fn resolve_operator(token: &Token) -> Result<CompiledOp, FilterError> {
    match token.kind {
        TokenKind::ComparisonOp | TokenKind::UnaryOp => lookup(&token.value, token.kind)
            .and_then(|op| op.compiled)
            .ok_or_else(|| FilterError::UnknownOperator(token.value.clone())),
        _ => Err(FilterError::UnknownOperator(token.value.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operator_token_resolves() {
        for op in OPERATORS.iter().filter(|op| op.compiled.is_some()) {
            assert_eq!(resolve_operator(&op.token()), Ok(op.compiled.unwrap()));
        }
    }

    #[test]
    fn test_unary_compiled_operators() {
        assert_eq!(resolve_operator(&Token::unary("is null")), Ok(CompiledOp::Eq));
        assert_eq!(resolve_operator(&Token::unary("is not null")), Ok(CompiledOp::Ne));
    }

    #[test]
    fn test_unknown_spelling() {
        assert_eq!(
            resolve_operator(&Token::comparison("=>")),
            Err(FilterError::UnknownOperator("=>".to_string()))
        );
        assert_eq!(
            resolve_operator(&Token::comparison("IS NULL")),
            Err(FilterError::UnknownOperator("IS NULL".to_string()))
        );
    }

    #[test]
    fn test_spelling_from_wrong_category() {
        assert_eq!(
            resolve_operator(&Token::comparison("is null")),
            Err(FilterError::UnknownOperator("is null".to_string()))
        );
        assert_eq!(
            resolve_operator(&Token::unary("=")),
            Err(FilterError::UnknownOperator("=".to_string()))
        );
    }

    #[test]
    fn test_snapshot_serializes_compiled_names() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["version"], CATALOG_VERSION);
        let operators = json["operators"].as_array().unwrap();
        assert_eq!(operators.len(), OPERATORS.len());
        assert_eq!(operators[9]["label"], "<=");
        assert_eq!(operators[9]["category"], "comparisonOp");
        assert_eq!(operators[9]["compiled"], "$lte");
        assert!(operators[0]["compiled"].is_null());
    }
}
