//! The token definition for the filter language.
//!
//! Tokens arrive already classified (usually from the autocomplete control),
//! so a token is just a kind plus the text the user picked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A token is a single unit of the language, with a specific kind and its surface text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn channel(name: impl Into<String>) -> Self {
        Self::new(TokenKind::Channel, name)
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Number, text)
    }

    /// A string literal, quotes included as typed.
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(TokenKind::String, text)
    }

    pub fn comparison(op: impl Into<String>) -> Self {
        Self::new(TokenKind::ComparisonOp, op)
    }

    pub fn unary(op: impl Into<String>) -> Self {
        Self::new(TokenKind::UnaryOp, op)
    }

    pub fn not() -> Self {
        Self::new(TokenKind::Not, "not")
    }

    pub fn and() -> Self {
        Self::new(TokenKind::And, "and")
    }

    pub fn or() -> Self {
        Self::new(TokenKind::Or, "or")
    }

    pub fn open_paren() -> Self {
        Self::new(TokenKind::OpenParen, "(")
    }

    pub fn close_paren() -> Self {
        Self::new(TokenKind::CloseParen, ")")
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    // Operands
    Channel,
    Number,
    String, // The raw string, including quotes

    // Operators
    ComparisonOp, // = != < > <= >=
    UnaryOp,      // is null, is not null

    // Keywords
    Not,
    And,
    Or,

    // Punctuation
    OpenParen,  // (
    CloseParen, // )
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Channel => "channel",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::ComparisonOp => "comparison operator",
            TokenKind::UnaryOp => "unary operator",
            TokenKind::Not => "'not'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let token = Token::comparison("<=");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"kind":"comparisonOp","value":"<="}"#);
    }

    #[test]
    fn test_deserialize_token_list() {
        let input = r#"[
            {"kind": "channel", "value": "CHANNEL_1"},
            {"kind": "unaryOp", "value": "is not null"},
            {"kind": "closeParen", "value": ")"}
        ]"#;
        let tokens: Vec<Token> = serde_json::from_str(input).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::channel("CHANNEL_1"),
                Token::unary("is not null"),
                Token::close_paren(),
            ]
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let input = r#"{"kind": "function", "value": "sum"}"#;
        assert!(serde_json::from_str::<Token>(input).is_err());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::ComparisonOp.to_string(), "comparison operator");
        assert_eq!(TokenKind::CloseParen.to_string(), "')'");
    }
}
