//! Token types for the declaration DSL.
//!
//! Tokens are the output of the lexer and input to the parser.

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns the 1-based line this token starts on.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.span.line
    }
}

/// Reserved words of the DSL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `namespace`
    Namespace,
    /// `data`
    Data,
    /// `marker`
    Marker,
    /// `deriving`
    Deriving,
    /// `where`
    Where,
    /// `with`
    With,
    /// `enum`
    Enum,
}

impl Keyword {
    /// Looks up a keyword by its spelling.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "namespace" => Some(Self::Namespace),
            "data" => Some(Self::Data),
            "marker" => Some(Self::Marker),
            "deriving" => Some(Self::Deriving),
            "where" => Some(Self::Where),
            "with" => Some(Self::With),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    /// Returns the spelling of this keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Data => "data",
            Self::Marker => "marker",
            Self::Deriving => "deriving",
            Self::Where => "where",
            Self::With => "with",
            Self::Enum => "enum",
        }
    }
}

/// Token types for the declaration DSL.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// A reserved word.
    Keyword(Keyword),
    /// Identifier like `Person` or `_`.
    Identifier(String),
    /// String literal, single or double quoted, with escapes resolved.
    String(String),
    /// Integer literal like `42`.
    Int(i64),
    /// Float literal like `1.5`.
    Float(f64),

    // Punctuation
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `::`
    DoubleColon,
    /// `|`
    Pipe,
    /// `=`
    Equals,
    /// `=>`
    Arrow,
    /// `\`
    Backslash,
    /// `?`
    Question,
    /// `$`
    Dollar,
    /// `.`
    Dot,

    // Trivia
    /// Run of whitespace, including newlines.
    Whitespace,
    /// `// ...` or `/* ... */`
    Comment,

    // Meta
    /// String literal without closing quote.
    UnterminatedString,
    /// Numeric literal too large to represent.
    NumberOutOfRange,
    /// Any character the DSL does not use on its own.
    Other(char),
    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during parsing.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }

    /// Returns a human-readable description of this token kind.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Keyword(k) => format!("'{}'", k.as_str()),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::String(_) => "string".to_string(),
            Self::Int(n) => format!("integer {n}"),
            Self::Float(n) => format!("float {n}"),
            Self::Other(c) => format!("'{c}'"),
            other => other.name().to_string(),
        }
    }

    /// Returns a short name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword(_) => "keyword",
            Self::Identifier(_) => "identifier",
            Self::String(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::DoubleColon => "'::'",
            Self::Pipe => "'|'",
            Self::Equals => "'='",
            Self::Arrow => "'=>'",
            Self::Backslash => "'\\'",
            Self::Question => "'?'",
            Self::Dollar => "'$'",
            Self::Dot => "'.'",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::UnterminatedString => "unterminated string",
            Self::NumberOutOfRange => "number out of range",
            Self::Other(_) => "character",
            Self::Eof => "end of file",
        }
    }
}
