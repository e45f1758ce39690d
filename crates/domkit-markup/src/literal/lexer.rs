use crate::error::StyleParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Str(String),
    /// Unsigned magnitude; the parser applies the sign and narrows to `i64`.
    Int(u64),
    Float(f64),
    /// Bare word. Only `True`, `False` and `None` are accepted by the parser.
    Ident(String),
    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Plus,
    Minus,
    // Sentinel
    Eof,
}

/// A token paired with the 1-based position where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, StyleParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let (line, col) = (self.line, self.col);
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, line, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn err(&self, msg: impl Into<String>) -> StyleParseError {
        StyleParseError::new(msg, self.line, self.col)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            // `#` line comments are legal inside a literal expression
            if self.peek() == Some('#') {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, StyleParseError> {
        let ch = match self.peek() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        let punct = match ch {
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            _ => None,
        };
        if let Some(tok) = punct {
            self.advance();
            return Ok(tok);
        }

        match ch {
            '"' | '\'' => self.lex_string(ch),
            c if c.is_ascii_digit() => self.lex_number(),
            '.' if matches!(self.peek_second(), Some(d) if d.is_ascii_digit()) => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.lex_ident()),
            other => Err(self.err(format!("unexpected character {:?}", other))),
        }
    }

    fn lex_string(&mut self, quote: char) -> Result<Token, StyleParseError> {
        let triple: String = std::iter::repeat_n(quote, 3).collect();
        let is_triple = self.rest().starts_with(&triple);
        if is_triple {
            for _ in 0..3 { self.advance(); }
        } else {
            self.advance();
        }

        let mut s = String::new();
        loop {
            if is_triple && self.rest().starts_with(&triple) {
                for _ in 0..3 { self.advance(); }
                break;
            }
            match self.advance() {
                None => return Err(self.err("unterminated string literal")),
                Some(c) if c == quote && !is_triple => break,
                Some('\n') if !is_triple => {
                    return Err(self.err("unterminated string literal"));
                }
                Some('\\') => self.lex_escape(&mut s)?,
                Some(c) => s.push(c),
            }
        }
        Ok(Token::Str(s))
    }

    fn lex_escape(&mut self, out: &mut String) -> Result<(), StyleParseError> {
        match self.advance() {
            None => return Err(self.err("unterminated escape sequence")),
            Some('\n') => {} // line continuation
            Some('n')  => out.push('\n'),
            Some('t')  => out.push('\t'),
            Some('r')  => out.push('\r'),
            Some('0')  => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"')  => out.push('"'),
            Some('x')  => out.push(self.lex_code_point(2)?),
            Some('u')  => out.push(self.lex_code_point(4)?),
            Some('U')  => out.push(self.lex_code_point(8)?),
            // unknown escapes keep their backslash
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
        }
        Ok(())
    }

    fn lex_code_point(&mut self, digits: usize) -> Result<char, StyleParseError> {
        let start = self.pos;
        for _ in 0..digits {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => { self.advance(); }
                _ => return Err(self.err(format!("escape needs {digits} hex digits"))),
            }
        }
        u32::from_str_radix(&self.src[start..self.pos], 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.err("invalid code point in escape"))
    }

    fn lex_number(&mut self) -> Result<Token, StyleParseError> {
        let radix = match (self.peek(), self.peek_second()) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            self.advance();
            self.advance();
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_digit(radix) || c == '_') {
                self.advance();
            }
            let digits: String = self.src[start..self.pos].chars().filter(|c| *c != '_').collect();
            if digits.is_empty() {
                return Err(self.err("integer literal has no digits"));
            }
            return u64::from_str_radix(&digits, radix)
                .map(Token::Int)
                .map_err(|_| self.err(format!("integer literal out of range: {digits}")));
        }

        let start = self.pos;
        let mut is_float = false;
        self.eat_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            self.eat_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.err("malformed exponent"));
            }
            self.eat_digits();
        }
        if matches!(self.peek(), Some('j' | 'J')) {
            return Err(self.err("complex literals are not supported"));
        }
        if matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            return Err(self.err("invalid character in number literal"));
        }

        let text: String = self.src[start..self.pos].chars().filter(|c| *c != '_').collect();
        if is_float {
            text.parse::<f64>()
                .map(Token::Float)
                .map_err(|_| self.err(format!("invalid number {:?}", text)))
        } else {
            if text.starts_with('0') && text.bytes().any(|b| b != b'0') {
                return Err(self.err("leading zeros in decimal integer literals are not permitted"));
            }
            text.parse::<u64>()
                .map(Token::Int)
                .map_err(|_| self.err(format!("integer literal out of range: {text}")))
        }
    }

    fn eat_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }
}
