//! Token 序列上的游标
//!
//! 只向前移动, 不回溯. 语法只需要一个 token 的前瞻.

use crate::error::{ExpectedKinds, FilterError};
use crate::token::{Token, TokenKind};

pub struct Cursor<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// 返回 `position + offset` 处的 token，不推进位置
    pub fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.position + offset)
    }

    /// 返回当前 token 并推进位置
    pub fn consume(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// 期望当前 token 属于 `expected` 中的某一类型并推进，否则返回错误
    pub fn expect(&mut self, expected: &[TokenKind]) -> Result<&'a Token, FilterError> {
        match self.peek(0) {
            None => Err(FilterError::MissingTokenAtEnd(ExpectedKinds::from(expected))),
            Some(token) if !expected.contains(&token.kind) => Err(FilterError::UnexpectedTokenKind {
                expected: ExpectedKinds::from(expected),
                kind: token.kind,
                value: token.value.clone(),
            }),
            Some(_) => Ok(self.advance()),
        }
    }

    /// 检查当前 token 是否为给定类型
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek(0).is_some_and(|token| token.kind == kind)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// 尚未消费的 token
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    fn advance(&mut self) -> &'a Token {
        let token = &self.tokens[self.position];
        self.position += 1;
        token
    }
}
