use indexmap::IndexMap;

use crate::error::StyleParseError;
use crate::literal::lexer::{Lexer, Token, TokenWithPos};
use crate::value::Value;

// ── Parser ────────────────────────────────────────────────────────────────

/// Recursive-descent parser for literal-only expressions.
///
/// Grammar (no names, calls or operators other than unary sign):
///
/// ```text
/// value  := dict | list | tuple | string+ | number | True | False | None
/// dict   := '{' (key ':' value (',' key ':' value)* ','?)? '}'
/// list   := '[' (value (',' value)* ','?)? ']'
/// tuple  := '(' (value (',' value)* ','?)? ')'
/// number := ('+' | '-')? (int | float)
/// ```
pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
    depth: usize,
}

/// Deepest container nesting accepted before parsing gives up.
pub const MAX_DEPTH: usize = 100;

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0, depth: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> StyleParseError {
        let (line, col) = self.current_pos();
        StyleParseError::new(msg, line, col)
    }

    /// Parse exactly one value and require the input to end there.
    pub fn parse_expression(&mut self) -> Result<Value, StyleParseError> {
        let value = self.parse_value()?;
        match self.peek() {
            Token::Eof => Ok(value),
            tok => Err(self.err(format!("unexpected {:?} after literal", tok))),
        }
    }

    // ── Value ─────────────────────────────────────────────────────────────

    fn parse_value(&mut self) -> Result<Value, StyleParseError> {
        match self.peek().clone() {
            open @ (Token::LBrace | Token::LBracket | Token::LParen) => {
                if self.depth >= MAX_DEPTH {
                    return Err(self.err("literal nested too deeply"));
                }
                self.depth += 1;
                let value = match open {
                    Token::LBrace   => self.parse_dict(),
                    Token::LBracket => self.parse_sequence(Token::RBracket, "list"),
                    _               => self.parse_sequence(Token::RParen, "tuple"),
                };
                self.depth -= 1;
                value
            }
            Token::Str(_)   => Ok(Value::Str(self.parse_strings())),
            Token::Plus | Token::Minus | Token::Int(_) | Token::Float(_) => self.parse_number(),
            Token::Ident(word) => {
                let value = match word.as_str() {
                    "True"  => Value::Bool(true),
                    "False" => Value::Bool(false),
                    "None"  => Value::None,
                    _ => {
                        return Err(self.err(format!("names are not allowed in a literal: {word}")));
                    }
                };
                self.advance();
                if self.peek() == &Token::LParen {
                    return Err(self.err("calls are not allowed in a literal"));
                }
                Ok(value)
            }
            Token::Eof => Err(self.err("unexpected end of input, expected a value")),
            tok => Err(self.err(format!("expected a value, got {:?}", tok))),
        }
    }

    /// Adjacent string literals concatenate, as in `'a' 'b'`.
    fn parse_strings(&mut self) -> String {
        let mut out = String::new();
        while let Token::Str(s) = self.peek() {
            out.push_str(s);
            self.advance();
        }
        out
    }

    fn parse_number(&mut self) -> Result<Value, StyleParseError> {
        let negative = match self.peek() {
            Token::Plus  => { self.advance(); false }
            Token::Minus => { self.advance(); true }
            _ => false,
        };
        if matches!(self.peek(), Token::Plus | Token::Minus) {
            return Err(self.err("only one unary sign may precede a number"));
        }
        match self.advance() {
            Token::Int(magnitude) => {
                let value = if negative {
                    0i64.checked_sub_unsigned(magnitude)
                } else {
                    i64::try_from(magnitude).ok()
                };
                value.map(Value::Int).ok_or_else(|| self.err("integer literal out of range"))
            }
            Token::Float(f) => Ok(Value::Float(if negative { -f } else { f })),
            tok => Err(self.err(format!("unary sign must precede a number, got {:?}", tok))),
        }
    }

    // ── Containers ────────────────────────────────────────────────────────

    fn parse_sequence(&mut self, close: Token, what: &str) -> Result<Value, StyleParseError> {
        self.advance(); // consume opener
        let mut items = Vec::new();
        loop {
            if self.peek() == &close {
                self.advance();
                break;
            }
            items.push(self.parse_value()?);
            match self.advance() {
                Token::Comma => {}
                tok if tok == close => break,
                Token::Eof => return Err(self.err(format!("unclosed {what}"))),
                tok => return Err(self.err(format!("expected ',' in {what}, got {:?}", tok))),
            }
        }
        Ok(Value::List(items))
    }

    fn parse_dict(&mut self) -> Result<Value, StyleParseError> {
        self.advance(); // consume `{`
        let mut map = IndexMap::new();
        loop {
            if self.peek() == &Token::RBrace {
                self.advance();
                break;
            }
            let key = match self.parse_value()? {
                Value::Str(s) => s,
                other => {
                    let kind = other.kind();
                    return Err(self.err(format!("mapping keys must be strings, got {kind}")));
                }
            };
            match self.advance() {
                Token::Colon => {}
                Token::Comma | Token::RBrace => {
                    return Err(self.err("set literals are not supported"));
                }
                tok => {
                    return Err(self.err(format!("expected ':' after mapping key, got {tok:?}")));
                }
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            match self.advance() {
                Token::Comma  => {}
                Token::RBrace => break,
                Token::Eof    => return Err(self.err("unclosed '{' mapping")),
                tok => {
                    return Err(self.err(format!("expected ',' or '}}' in mapping, got {tok:?}")));
                }
            }
        }
        Ok(Value::Map(map))
    }
}

// ── Public parse entry points ─────────────────────────────────────────────

/// Parse a literal expression (mappings, lists, tuples, strings, numbers,
/// `True`, `False`, `None`) without evaluating anything.
pub fn parse_literal(src: &str) -> Result<Value, StyleParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_expression()
}

/// Parse a `style` attribute. The top-level literal must be a mapping.
pub fn parse_style(src: &str) -> Result<Value, StyleParseError> {
    let value = parse_literal(src)?;
    if value.as_map().is_none() {
        return Err(StyleParseError::new(
            format!("style must be a mapping, got {}", value.kind()),
            1,
            1,
        ));
    }
    Ok(value)
}
