//! Lexer for the declaration DSL.
//!
//! The lexer converts source text into a flat stream of tokens. Whitespace
//! and comments are kept as trivia tokens so spans stay contiguous; the
//! parser skips them. Lexing never fails: characters the DSL has no use for
//! become [`TokenKind::Other`] and are rejected by the parser.

use crate::span::Span;
use crate::token::{Keyword, Token, TokenKind};

/// Lexer for DSL source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
            );
        };

        let kind = match c {
            c if c.is_whitespace() => self.scan_whitespace(),
            '/' if matches!(self.peek_char_n(1), Some('/' | '*')) => self.scan_comment(),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '|' => self.single(TokenKind::Pipe),
            '\\' => self.single(TokenKind::Backslash),
            '?' => self.single(TokenKind::Question),
            '$' => self.single(TokenKind::Dollar),
            '.' => self.single(TokenKind::Dot),
            ':' => {
                self.advance();
                if self.peek_char() == Some(':') {
                    self.advance();
                    TokenKind::DoubleColon
                } else {
                    TokenKind::Colon
                }
            }
            '=' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    TokenKind::Equals
                }
            }
            '"' | '\'' => self.scan_string(c),
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) => self.scan_word(),
            c => self.single(TokenKind::Other(c)),
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Trivia is included; the last token is always [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` positions ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes one character and returns `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Scans a run of whitespace.
    fn scan_whitespace(&mut self) -> TokenKind {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
        TokenKind::Whitespace
    }

    /// Scans a `//` line comment or a `/* */` block comment.
    ///
    /// An unclosed block comment runs to the end of input.
    fn scan_comment(&mut self) -> TokenKind {
        self.advance(); // consume '/'
        if self.peek_char() == Some('/') {
            while let Some(c) = self.peek_char() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
        } else {
            self.advance(); // consume '*'
            while let Some(c) = self.peek_char() {
                if c == '*' && self.peek_char_n(1) == Some('/') {
                    self.advance();
                    self.advance();
                    break;
                }
                self.advance();
            }
        }
        TokenKind::Comment
    }

    /// Scans a string literal delimited by `quote`.
    ///
    /// Recognized escapes are `\\`, `\'`, `\"`, `\n` and `\t`; any other
    /// backslash is kept verbatim so class names like `"\RuntimeException"`
    /// survive.
    fn scan_string(&mut self, quote: char) -> TokenKind {
        self.advance(); // consume opening quote
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some(c) if c == quote => {
                    self.advance();
                    return TokenKind::String(text);
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some(c @ ('\\' | '\'' | '"')) => {
                            self.advance();
                            text.push(c);
                        }
                        Some('n') => {
                            self.advance();
                            text.push('\n');
                        }
                        Some('t') => {
                            self.advance();
                            text.push('\t');
                        }
                        Some(_) => text.push('\\'),
                        None => return TokenKind::UnterminatedString,
                    }
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
                None => return TokenKind::UnterminatedString,
            }
        }
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;
        let mut has_dot = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.'
                && !has_dot
                && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
            {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start..self.position];
        if has_dot {
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => TokenKind::Float(n),
                _ => TokenKind::NumberOutOfRange,
            }
        } else {
            text.parse::<i64>().map_or(TokenKind::NumberOutOfRange, TokenKind::Int)
        }
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(is_identifier_char) {
            self.advance();
        }
        let word = &self.source[start..self.position];
        match Keyword::from_word(word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(word.to_string()),
        }
    }
}

/// Returns true if `c` can start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` can appear in an identifier (not at start).
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
