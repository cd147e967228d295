//! 过滤表达式的语法分析器
//!
//! ## 解析流程图
//!
//! ```text
//! parse()
//!   └─ parse_search_condition()            (OR, 最低优先级)
//!        ├─ parse_boolean_term()           (AND)
//!        │    ├─ parse_boolean_factor()
//!        │    │    ├─ 可选的 "not" → 标记取反
//!        │    │    ├─ "(" → parse_search_condition() → 期望 ")"
//!        │    │    └─ 其他 → parse_predicate()
//!        │    │              ├─ 左操作数必须是通道
//!        │    │              ├─ 期望 比较运算符 或 一元运算符
//!        │    │              └─ 比较运算符 → parse_operand()
//!        │    │
//!        │    └─ 遇到 "and" 时，继续解析右侧因子
//!        │
//!        └─ 遇到 "or" 时，继续解析右侧项
//! ```
//!
//! ## 语法
//!
//! ```text
//! SearchCondition ::= BooleanTerm ("or" BooleanTerm)*
//! BooleanTerm     ::= BooleanFactor ("and" BooleanFactor)*
//! BooleanFactor   ::= "not"? ( Predicate | "(" SearchCondition ")" )
//! Predicate       ::= Channel ( ComparisonOp Operand | UnaryOp )
//! Operand         ::= Channel | String | Number
//! ```
//!
//! ## 解析示例
//!
//! ```text
//! timestamp > 1 and CHANNEL_1 <= 1
//! not (shotnum = 3 or activeArea is not null)
//! CHANNEL_1 = 'foo' or CHANNEL_2 != CHANNEL_1
//! ```

use crate::ast::{Condition, Operand, Predicate};
use crate::catalog::resolve_operator;
use crate::cursor::Cursor;
use crate::error::FilterError;
use crate::token::{Token, TokenKind};
use serde_json::Number;

const OPERATOR_KINDS: [TokenKind; 2] = [TokenKind::ComparisonOp, TokenKind::UnaryOp];

/// 括号的最大嵌套层数, 超过时报错而不是耗尽栈空间
pub const MAX_NESTING_DEPTH: usize = 128;

pub struct Parser<'a> {
    cursor: Cursor<'a>,
    /// 当前括号嵌套层数
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            cursor: Cursor::new(tokens),
            depth: 0,
        }
    }

    /// 解析一个完整的条件; 之后剩余的 token 不做检查
    pub fn parse(&mut self) -> Result<Condition, FilterError> {
        self.parse_search_condition()
    }

    /// 与 `parse` 相同，但完整表达式之后若还有 token 则报错
    pub fn parse_complete(&mut self) -> Result<Condition, FilterError> {
        let condition = self.parse_search_condition()?;
        match self.cursor.peek(0) {
            Some(token) => Err(FilterError::TrailingToken(token.value.clone())),
            None => Ok(condition),
        }
    }

    /// 解析之后尚未消费的 token
    pub fn remaining(&self) -> &'a [Token] {
        self.cursor.remaining()
    }

    /// 解析OR表达式 (最低优先级)
    ///
    /// 语法: `term ("or" term)*`
    fn parse_search_condition(&mut self) -> Result<Condition, FilterError> {
        let mut terms = vec![self.parse_boolean_term()?];

        while self.cursor.check(TokenKind::Or) {
            self.cursor.consume(); // 消费 or
            terms.push(self.parse_boolean_term()?);
        }

        Ok(collapse(terms, Condition::Or))
    }

    /// 解析AND表达式
    ///
    /// 语法: `factor ("and" factor)*`
    fn parse_boolean_term(&mut self) -> Result<Condition, FilterError> {
        let mut factors = vec![self.parse_boolean_factor()?];

        while self.cursor.check(TokenKind::And) {
            self.cursor.consume(); // 消费 and
            factors.push(self.parse_boolean_factor()?);
        }

        Ok(collapse(factors, Condition::And))
    }

    /// 解析因子: 可选的 NOT, 然后是分组表达式或谓词
    ///
    /// NOT 只作用于紧随其后的一个因子, `not A and B` 等价于 `(not A) and B`
    fn parse_boolean_factor(&mut self) -> Result<Condition, FilterError> {
        let negated = self.cursor.check(TokenKind::Not);
        if negated {
            self.cursor.consume(); // 消费 not
        }

        let Some(token) = self.cursor.peek(0) else {
            return Err(FilterError::ExpressionIncomplete);
        };

        let inner = if token.kind == TokenKind::OpenParen {
            self.cursor.consume(); // 消费 (
            if self.depth >= MAX_NESTING_DEPTH {
                return Err(FilterError::NestingTooDeep(MAX_NESTING_DEPTH));
            }
            self.depth += 1;
            let condition = self.parse_search_condition()?;
            self.cursor.expect(&[TokenKind::CloseParen])?;
            self.depth -= 1;
            condition
        } else {
            Condition::Predicate(self.parse_predicate()?)
        };

        log::trace!("factor parsed (negated: {}) at token {}", negated, self.cursor.position());

        if negated {
            Ok(Condition::Not(Box::new(inner)))
        } else {
            Ok(inner)
        }
    }

    /// 解析谓词: `channel op operand` 或 `channel unary_op`
    fn parse_predicate(&mut self) -> Result<Predicate, FilterError> {
        let channel = match self.cursor.peek(0) {
            None => return Err(FilterError::MissingOperand),
            Some(token) => match token.kind {
                TokenKind::Channel => {
                    self.cursor.consume();
                    token.value.clone()
                }
                TokenKind::String | TokenKind::Number => {
                    return Err(FilterError::UnexpectedLeftOperand {
                        kind: token.kind,
                        value: token.value.clone(),
                    });
                }
                _ => return Err(FilterError::UnexpectedToken(token.value.clone())),
            },
        };

        let operator = self.cursor.expect(&OPERATOR_KINDS)?;
        let op = resolve_operator(operator)?;

        let operand = if operator.kind == TokenKind::ComparisonOp {
            self.parse_operand()?
        } else {
            Operand::Null
        };

        Ok(Predicate { channel, op, operand })
    }

    /// 解析比较运算符右侧的操作数
    fn parse_operand(&mut self) -> Result<Operand, FilterError> {
        let Some(token) = self.cursor.consume() else {
            return Err(FilterError::MissingOperand);
        };

        match token.kind {
            TokenKind::Channel => Ok(Operand::Channel(token.value.clone())),
            TokenKind::String => Ok(Operand::String(strip_quotes(&token.value).to_string())),
            TokenKind::Number => parse_number(&token.value)
                .map(Operand::Number)
                .ok_or_else(|| FilterError::InvalidNumber(token.value.clone())),
            _ => Err(FilterError::UnexpectedToken(token.value.clone())),
        }
    }
}

/// 单个子项折叠为其自身, 多个子项组合为复合节点
fn collapse(mut items: Vec<Condition>, combine: fn(Vec<Condition>) -> Condition) -> Condition {
    if items.len() == 1 {
        items.remove(0)
    } else {
        combine(items)
    }
}

/// 去掉字符串两端的单引号和双引号
fn strip_quotes(raw: &str) -> &str {
    raw.trim_matches(|c| c == '"' || c == '\'')
}

/// 整数值不带小数部分输出 (`1.0` → `1`), 非有限值视为无效
fn parse_number(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Number::from(n));
    }

    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}
