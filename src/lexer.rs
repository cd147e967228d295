//! 过滤表达式的词法分析器
//!
//! 编译器本身只接受已分类的 token; 这里的词法分析器把自由文本切分成同样的
//! token 序列, 供交互式命令行, 基准测试和测试使用.
//!
//! 词法分析器不会失败: 无法识别的符号会作为比较运算符 token 输出, 由语法
//! 分析器按运算符目录校验后报告 `UnknownOperator`.

use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    /// 输入字符串中的当前位置（字节索引）
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// 返回当前位置的字符，不推进位置
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// 返回下一个位置的字符，不推进位置
    fn peek_next(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    /// 推进位置一个字符并返回该字符
    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    /// 跳过空白字符
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// 读取数字字面量, 支持小数和指数形式
    fn read_number(&mut self, start: usize) -> Token {
        let mut previous = '\0';
        while let Some(c) = self.peek() {
            let is_exponent_sign = (c == '-' || c == '+') && (previous == 'e' || previous == 'E');
            if c.is_ascii_alphanumeric() || c == '.' || is_exponent_sign {
                previous = c;
                self.bump();
            } else {
                break;
            }
        }
        Token::number(&self.input[start..self.position])
    }

    /// 读取引号包围的字符串字面量, 保留引号
    /// 注意：开始的引号已经被调用者消费
    fn read_string(&mut self, start: usize, quote: char) -> Token {
        while let Some(c) = self.bump() {
            if c == quote {
                break;
            }
        }
        Token::string(&self.input[start..self.position])
    }

    /// 读取由 `<>=!` 组成的运算符
    fn read_operator(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek() {
            if is_operator_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        Token::comparison(&self.input[start..self.position])
    }

    /// 读取标识符或关键字
    /// 标识符可以包含字母、数字、点、连字符和下划线
    fn read_identifier(&mut self, start: usize) -> Token {
        let input = self.input;
        self.position = word_end(input, start);
        let literal = &input[start..self.position];

        match literal.to_ascii_lowercase().as_str() {
            "and" => Token::and(),
            "or" => Token::or(),
            "not" => Token::not(),
            "is" => self.read_null_check().unwrap_or_else(|| Token::channel(literal)),
            _ => Token::channel(literal),
        }
    }

    /// 在 "is" 之后尝试读取 "null" 或 "not null"; 不匹配时不推进位置
    fn read_null_check(&mut self) -> Option<Token> {
        let (word, end) = next_word(self.input, self.position)?;
        if word.eq_ignore_ascii_case("null") {
            self.position = end;
            return Some(Token::unary("is null"));
        }
        if word.eq_ignore_ascii_case("not") {
            let (word, end) = next_word(self.input, end)?;
            if word.eq_ignore_ascii_case("null") {
                self.position = end;
                return Some(Token::unary("is not null"));
            }
        }
        None
    }
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '!')
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

fn word_end(input: &str, start: usize) -> usize {
    input[start..]
        .char_indices()
        .find(|(_, c)| !is_identifier_char(*c))
        .map_or(input.len(), |(i, _)| start + i)
}

/// 跳过空白后读取下一个单词
fn next_word(input: &str, from: usize) -> Option<(&str, usize)> {
    let start = input[from..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| from + i)?;
    let end = word_end(input, start);
    if end == start {
        None
    } else {
        Some((&input[start..end], end))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let start = self.position;

        let Some(c) = self.bump() else {
            return None; // 到达输入末尾
        };

        let token = match c {
            '(' => Token::open_paren(),
            ')' => Token::close_paren(),
            '"' | '\'' => self.read_string(start, c),
            c if is_operator_char(c) => self.read_operator(start),
            c if c.is_ascii_digit() => self.read_number(start),
            '-' | '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.read_number(start),
            '-' if self.peek() == Some('.') && self.peek_next().is_some_and(|n| n.is_ascii_digit()) => {
                self.read_number(start)
            }
            c if c.is_alphabetic() || c == '_' => self.read_identifier(start),
            _ => Token::new(TokenKind::ComparisonOp, c.to_string()),
        };
        Some(token)
    }
}
