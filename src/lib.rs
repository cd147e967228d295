//! Compiles a classified token sequence (as produced by the filter
//! autocomplete control) into a MongoDB-style filter document string.
//!
//! ```
//! use filter_compiler::{parse_filter, Token};
//!
//! let tokens = vec![
//!     Token::channel("timestamp"),
//!     Token::comparison("<"),
//!     Token::number("1"),
//! ];
//! assert_eq!(parse_filter(&tokens).unwrap(), r#"{"metadata.timestamp":{"$lt":1}}"#);
//! ```

pub mod ast;
pub mod catalog;
pub mod compiler;
pub mod config;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Condition, Operand, Predicate};
pub use catalog::{CompiledOp, Operator, CATALOG_VERSION, OPERATORS};
pub use compiler::QueryCompiler;
pub use config::{resolve_field_path, FieldMapping};
pub use error::FilterError;
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Parse tokens into a condition tree without rendering it.
pub fn parse_condition(tokens: &[Token]) -> Result<Condition, FilterError> {
    Parser::new(tokens).parse()
}

/// Compile tokens into a filter string using the built-in field mapping.
///
/// Tokens left over after a complete expression are ignored; use
/// [`parse_filter_strict`] to reject them.
pub fn parse_filter(tokens: &[Token]) -> Result<String, FilterError> {
    let condition = parse_condition(tokens)?;
    Ok(render(tokens, &condition))
}

/// Like [`parse_filter`], but fails with `TrailingToken` if any token is left
/// after a complete expression.
pub fn parse_filter_strict(tokens: &[Token]) -> Result<String, FilterError> {
    let condition = Parser::new(tokens).parse_complete()?;
    Ok(render(tokens, &condition))
}

fn render(tokens: &[Token], condition: &Condition) -> String {
    let filter = QueryCompiler::default().compile(condition);
    log::debug!("compiled {} tokens into {}", tokens.len(), filter);
    filter
}
