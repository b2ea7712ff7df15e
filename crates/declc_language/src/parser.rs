//! Parser for the declaration DSL.
//!
//! A recursive-descent parser over a cursor into the trivia-free token
//! stream. It recognizes namespaces, `data`, `enum` and `marker`
//! declarations and hands each one to [`DeclarationBuilder`] for
//! validation before adding it to a [`DeclarationRegistry`].

use declc_foundation::{Error, ErrorContext, ErrorKind, Result, join_qualified};

use crate::declaration::{
    ALL_CONSTRUCTORS, Argument, BuiltinType, Condition, Constructor, Declaration,
    DeclarationBuilder, Deriving, DerivingKind, EnumOptions, ExceptionConstructor,
    ExceptionOptions, Literal,
};
use crate::lexer::Lexer;
use crate::registry::DeclarationRegistry;
use crate::token::{Keyword, Token, TokenKind};

/// Source identifier used when none is given.
pub const ANONYMOUS_SOURCE: &str = "<input>";

/// Parser for DSL source code.
pub struct Parser<'src> {
    /// Source text (for expression slices and error context).
    source: &'src str,
    /// Identifier reported in errors, usually a file path.
    source_id: String,
    /// Tokens without trivia; the last one is always `Eof`.
    tokens: Vec<Token>,
    /// Cursor into `tokens`.
    pos: usize,
    /// Namespace declarations are currently placed in.
    namespace: String,
    /// Whether we are inside a `namespace X { ... }` block.
    in_block: bool,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let tokens = Lexer::tokenize_all(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            source,
            source_id: ANONYMOUS_SOURCE.to_string(),
            tokens,
            pos: 0,
            namespace: String::new(),
            in_block: false,
        }
    }

    /// Sets the identifier reported in errors.
    #[must_use]
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Parses the whole source into a registry.
    ///
    /// # Errors
    /// Returns a `ParseError` for malformed input, and propagates
    /// declaration, deriving and duplicate errors with source context.
    pub fn parse_all(&mut self) -> Result<DeclarationRegistry> {
        let mut registry = DeclarationRegistry::new();

        loop {
            let token = self.current().clone();
            match &token.kind {
                TokenKind::Eof if self.in_block => {
                    return Err(self.error("unexpected end of file"));
                }
                TokenKind::Eof => break,
                TokenKind::Keyword(Keyword::Namespace) => self.parse_namespace()?,
                TokenKind::Keyword(Keyword::Data) => {
                    let declaration = self.parse_data()?;
                    self.register(&mut registry, declaration, &token)?;
                }
                TokenKind::Keyword(Keyword::Enum) => {
                    let declaration = self.parse_enum()?;
                    self.register(&mut registry, declaration, &token)?;
                }
                TokenKind::Keyword(Keyword::Marker) => {
                    let declaration = self.parse_marker()?;
                    self.register(&mut registry, declaration, &token)?;
                }
                TokenKind::RBrace if self.in_block => {
                    self.advance();
                    self.in_block = false;
                    self.namespace.clear();
                }
                TokenKind::RBrace => return Err(self.error("unexpected '}'")),
                _ => return Err(self.error("unknown definition")),
            }
        }

        log::debug!(
            "parsed {} declaration(s) from {}",
            registry.len(),
            self.source_id
        );
        Ok(registry)
    }

    fn register(
        &self,
        registry: &mut DeclarationRegistry,
        declaration: Declaration,
        start: &Token,
    ) -> Result<()> {
        log::debug!(
            "parsed {} {} ({} constructor(s), {} deriving(s))",
            declaration.kind(),
            declaration.qualified_name(),
            declaration.constructors().len(),
            declaration.derivings().len()
        );
        registry
            .add(declaration)
            .map_err(|e| e.with_context(self.context_for(start)))
    }

    // =========================================================================
    // Top Level
    // =========================================================================

    /// `namespace qname (';' | '{')`
    fn parse_namespace(&mut self) -> Result<()> {
        if self.in_block {
            return Err(self.error("nested namespaces are not allowed"));
        }
        self.advance();
        let (name, _) = self.parse_qualified_name("namespace name")?;

        match self.current().kind {
            TokenKind::Semicolon => {
                self.advance();
            }
            TokenKind::LBrace => {
                self.advance();
                self.in_block = true;
            }
            _ => return Err(self.unexpected("expected ';' or '{'")),
        }
        self.namespace = name;
        Ok(())
    }

    /// `data IDENT [':' STRING] '=' ctors [deriving] [with] [where] ';'`
    fn parse_data(&mut self) -> Result<Declaration> {
        let start = self.advance();
        let name = self.expect_identifier("declaration name")?;

        let mut builder = DeclarationBuilder::data(self.namespace.clone(), name).line(start.line());

        if self.eat(&TokenKind::Colon) {
            builder = builder.message_name(self.expect_string("message name")?);
        }
        self.expect(&TokenKind::Equals, "'='")?;

        let mut constructors = vec![self.parse_constructor()?];
        while self.eat(&TokenKind::Pipe) {
            constructors.push(self.parse_constructor()?);
        }
        builder = builder.constructors(constructors);

        let mut derivings = Vec::new();
        if self.current().kind.is_keyword(Keyword::Deriving) {
            derivings = self.parse_derivings()?;
        }

        if self.current().kind.is_keyword(Keyword::With) {
            let with = self.current().clone();
            let values = self.parse_with()?;
            let Some(Deriving::Enum(options)) = derivings
                .iter_mut()
                .find(|d| d.kind() == DerivingKind::Enum)
            else {
                return Err(self.error_at(&with, "'with' requires the Enum deriving"));
            };
            options.values = Some(values);
        }

        for deriving in derivings {
            builder = builder.deriving(deriving);
        }

        if self.current().kind.is_keyword(Keyword::Where) {
            for condition in self.parse_conditions()? {
                builder = builder.condition(condition);
            }
        }

        self.expect(&TokenKind::Semicolon, "';'")?;
        self.finish(builder, &start)
    }

    /// `enum IDENT '=' IDENT ('|' IDENT)* [with] ';'`
    fn parse_enum(&mut self) -> Result<Declaration> {
        let start = self.advance();
        let name = self.expect_identifier("enum name")?;
        self.expect(&TokenKind::Equals, "'='")?;

        let mut constructors = Vec::new();
        loop {
            let option = self.expect_identifier("enum option")?;
            constructors.push(Constructor::new(
                join_qualified(&self.namespace, &option),
                Vec::new(),
            ));
            if !self.eat(&TokenKind::Pipe) {
                break;
            }
        }

        let mut options = EnumOptions::default();
        if self.current().kind.is_keyword(Keyword::With) {
            options.values = Some(self.parse_with()?);
        }
        self.expect(&TokenKind::Semicolon, "';'")?;

        let builder = DeclarationBuilder::data(self.namespace.clone(), name)
            .line(start.line())
            .constructors(constructors)
            .deriving(Deriving::Enum(options));
        self.finish(builder, &start)
    }

    /// `marker IDENT [':' qname] ';'`
    fn parse_marker(&mut self) -> Result<Declaration> {
        let start = self.advance();
        let name = self.expect_identifier("marker name")?;

        let mut builder =
            DeclarationBuilder::marker(self.namespace.clone(), name).line(start.line());
        if self.eat(&TokenKind::Colon) {
            let (parent, absolute) = self.parse_qualified_name("parent marker")?;
            builder = builder.parent_marker(self.resolve_class(&parent, absolute));
        }
        self.expect(&TokenKind::Semicolon, "';'")?;
        self.finish(builder, &start)
    }

    fn finish(&self, builder: DeclarationBuilder, start: &Token) -> Result<Declaration> {
        builder
            .build()
            .map_err(|e| e.with_context(self.context_for(start)))
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// `ScalarTag ['[' ']'] | qname ['{' [arg (',' arg)*] '}']`
    fn parse_constructor(&mut self) -> Result<Constructor> {
        if let TokenKind::Identifier(name) = &self.current().kind {
            let qualified_follows = matches!(
                self.peek_nth(1).kind,
                TokenKind::Backslash | TokenKind::Dot
            );
            if let Some(builtin) = BuiltinType::from_constructor_tag(name) {
                if !qualified_follows {
                    self.advance();
                    let is_list = self.parse_list_marker()?;
                    return Ok(Constructor::scalar(builtin, is_list));
                }
            }
        }

        let (name, absolute) = self.parse_qualified_name("constructor name")?;
        let name = self.resolve_class(&name, absolute);

        let mut arguments = Vec::new();
        if self.eat(&TokenKind::LBrace) {
            if !self.eat(&TokenKind::RBrace) {
                loop {
                    arguments.push(self.parse_argument()?);
                    if self.eat(&TokenKind::Comma) {
                        continue;
                    }
                    self.expect(&TokenKind::RBrace, "',' or '}'")?;
                    break;
                }
            }
        }
        Ok(Constructor::new(name, arguments))
    }

    /// `['?'] [type] ['[' ']'] '$' IDENT ['=' literal]`
    fn parse_argument(&mut self) -> Result<Argument> {
        let nullable = self.eat(&TokenKind::Question);

        let type_hint = match self.current().kind {
            TokenKind::Identifier(_) | TokenKind::Backslash => {
                let (name, absolute) = self.parse_qualified_name("argument type")?;
                Some(self.resolve_type(&name, absolute))
            }
            _ => None,
        };
        let is_list = self.parse_list_marker()?;

        self.expect(&TokenKind::Dollar, "'$'")?;
        let name = self.expect_variable_name()?;

        let mut argument = Argument::new(name);
        argument.type_hint = type_hint;
        argument.nullable = nullable;
        argument.is_list = is_list;
        if self.eat(&TokenKind::Equals) {
            argument.default = Some(self.parse_literal()?);
        }
        Ok(argument)
    }

    fn parse_list_marker(&mut self) -> Result<bool> {
        if self.eat(&TokenKind::LBracket) {
            self.expect(&TokenKind::RBracket, "']'")?;
            return Ok(true);
        }
        Ok(false)
    }

    // =========================================================================
    // Derivings
    // =========================================================================

    /// `'deriving' '(' ditem (',' ditem)* ')'`
    fn parse_derivings(&mut self) -> Result<Vec<Deriving>> {
        self.advance();
        self.expect(&TokenKind::LParen, "'('")?;

        let mut derivings = vec![self.parse_deriving()?];
        while self.eat(&TokenKind::Comma) {
            derivings.push(self.parse_deriving()?);
        }
        self.expect(&TokenKind::RParen, "',' or ')'")?;
        Ok(derivings)
    }

    /// `IDENT ['(' params ')'] [':' STRING]`
    fn parse_deriving(&mut self) -> Result<Deriving> {
        let name_token = self.current().clone();
        let name = self.expect_identifier("deriving name")?;
        let Some(kind) = DerivingKind::from_name(&name) else {
            return Err(self.error_at(&name_token, &format!("unknown deriving '{name}'")));
        };
        let mut deriving = Deriving::from_kind(kind);

        if self.current().kind == TokenKind::LParen {
            match &mut deriving {
                Deriving::Enum(options) => self.parse_enum_flags(options)?,
                Deriving::Exception(options) => self.parse_exception_params(options)?,
                _ => {
                    return Err(self.error(&format!("deriving {name} takes no parameters")));
                }
            }
        }

        if self.current().kind == TokenKind::Colon {
            let Deriving::Exception(options) = &mut deriving else {
                return Err(self.error(&format!("deriving {name} takes no message")));
            };
            self.advance();
            options.default_message = Some(self.expect_string("exception message")?);
        }

        Ok(deriving)
    }

    /// `'(' ('useName' | 'useValue') (',' ...)* ')'`
    fn parse_enum_flags(&mut self, options: &mut EnumOptions) -> Result<()> {
        self.advance();
        loop {
            let flag_token = self.current().clone();
            match self.expect_identifier("Enum option")?.as_str() {
                "useName" => options.use_value = false,
                "useValue" => options.use_value = true,
                other => {
                    return Err(
                        self.error_at(&flag_token, &format!("unknown Enum option '{other}'"))
                    );
                }
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "',' or ')'")?;
        Ok(())
    }

    /// `'(' (IDENT ':' STRING | qname) (',' ...)* ')'`
    fn parse_exception_params(&mut self, options: &mut ExceptionOptions) -> Result<()> {
        self.advance();
        loop {
            let is_factory = matches!(self.current().kind, TokenKind::Identifier(_))
                && self.peek_nth(1).kind == TokenKind::Colon;
            if is_factory {
                let name = self.expect_identifier("named constructor")?;
                self.advance();
                let message = self.expect_string("message template")?;
                options.constructors.push(ExceptionConstructor::new(name, message));
            } else {
                let parent_token = self.current().clone();
                let (parent, absolute) = self.parse_qualified_name("parent exception")?;
                if options.parent.is_some() {
                    return Err(self.error_at(&parent_token, "exception parent given twice"));
                }
                options.parent = Some(self.resolve_class(&parent, absolute));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "',' or ')'")?;
        Ok(())
    }

    /// `'with' '(' IDENT ':' literal (',' IDENT ':' literal)* ')'`
    fn parse_with(&mut self) -> Result<Vec<(String, Literal)>> {
        self.advance();
        self.expect(&TokenKind::LParen, "'('")?;

        let mut values = Vec::new();
        loop {
            let key = self.expect_identifier("constructor name")?;
            self.expect(&TokenKind::Colon, "':'")?;
            values.push((key, self.parse_literal()?));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "',' or ')'")?;
        Ok(values)
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// `'where' cond ('|' cond)*`
    fn parse_conditions(&mut self) -> Result<Vec<Condition>> {
        self.advance();
        let mut conditions = vec![self.parse_condition()?];
        while self.eat(&TokenKind::Pipe) {
            conditions.push(self.parse_condition()?);
        }
        Ok(conditions)
    }

    /// `[IDENT ':'] <tokens up to '=>'> '=>' STRING`
    fn parse_condition(&mut self) -> Result<Condition> {
        let mut target = ALL_CONSTRUCTORS.to_string();
        if let TokenKind::Identifier(name) = &self.current().kind {
            if self.peek_nth(1).kind == TokenKind::Colon {
                target = name.clone();
                self.advance();
                self.advance();
            }
        }

        let first = self.current().clone();
        let mut last = None;
        loop {
            match &self.current().kind {
                TokenKind::Arrow => break,
                TokenKind::Eof => return Err(self.error("unexpected end of file")),
                TokenKind::Semicolon => return Err(self.unexpected("expected '=>'")),
                _ => last = Some(self.advance()),
            }
        }
        let Some(last) = last else {
            return Err(self.unexpected("expected condition expression"));
        };
        let expression = self.source[first.span.start..last.span.end].trim().to_string();

        self.expect(&TokenKind::Arrow, "'=>'")?;
        let message = self.expect_string("condition message")?;
        Ok(Condition::new(target, expression, message))
    }

    // =========================================================================
    // Names & Literals
    // =========================================================================

    /// `['\'] IDENT (('\' | '.') IDENT)*`, returned joined with `\`.
    fn parse_qualified_name(&mut self, what: &str) -> Result<(String, bool)> {
        let absolute = self.eat(&TokenKind::Backslash);
        let mut segments = vec![self.expect_identifier(what)?];
        while matches!(self.current().kind, TokenKind::Backslash | TokenKind::Dot) {
            self.advance();
            segments.push(self.expect_identifier(what)?);
        }
        Ok((segments.join("\\"), absolute))
    }

    /// Resolves a class reference against the current namespace.
    fn resolve_class(&self, name: &str, absolute: bool) -> String {
        if absolute {
            name.to_string()
        } else {
            join_qualified(&self.namespace, name)
        }
    }

    /// Like [`Self::resolve_class`], but keeps lower-case builtins.
    fn resolve_type(&self, name: &str, absolute: bool) -> String {
        if !absolute && BuiltinType::from_type_name(name).is_some() {
            name.to_string()
        } else {
            self.resolve_class(name, absolute)
        }
    }

    /// `STRING | ['-'] INT | ['-'] FLOAT | true | false | null | '[' ']'`
    fn parse_literal(&mut self) -> Result<Literal> {
        let negative = self.current().kind == TokenKind::Other('-');
        if negative {
            self.advance();
        }

        let literal = match self.current().kind.clone() {
            TokenKind::Int(n) => Literal::Int(if negative { -n } else { n }),
            TokenKind::Float(n) => Literal::Float(if negative { -n } else { n }),
            TokenKind::NumberOutOfRange => return Err(self.error("number literal out of range")),
            _ if negative => return Err(self.unexpected("expected number")),
            TokenKind::String(s) => Literal::String(s),
            TokenKind::Identifier(word) => match word.as_str() {
                "true" => Literal::Bool(true),
                "false" => Literal::Bool(false),
                "null" => Literal::Null,
                _ => return Err(self.unexpected("expected literal")),
            },
            TokenKind::LBracket => {
                self.advance();
                self.expect(&TokenKind::RBracket, "']'")?;
                return Ok(Literal::EmptyList);
            }
            _ => return Err(self.unexpected("expected literal")),
        };
        self.advance();
        Ok(literal)
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    fn current(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Returns the token `n` positions ahead; `Eof` past the end.
    fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Consumes the current token and returns it.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it has the same kind as `kind`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the given kind, then advances.
    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token> {
        if std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("expected {expected}")))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(&format!("expected {what}"))),
        }
    }

    /// Any word may follow `$`, keywords included.
    fn expect_variable_name(&mut self) -> Result<String> {
        let name = match &self.current().kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(keyword) => keyword.as_str().to_string(),
            _ => return Err(self.unexpected("expected argument name")),
        };
        self.advance();
        Ok(name)
    }

    fn expect_string(&mut self, what: &str) -> Result<String> {
        match &self.current().kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            TokenKind::UnterminatedString => Err(self.error("unterminated string")),
            _ => Err(self.unexpected(&format!("expected {what}"))),
        }
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Error at the current token; end of input wins over `message`.
    fn unexpected(&self, message: &str) -> Error {
        if self.current().kind == TokenKind::Eof {
            self.error("unexpected end of file")
        } else {
            self.error(message)
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current(), message)
    }

    /// Creates a parse error at a specific token.
    fn error_at(&self, token: &Token, message: &str) -> Error {
        Error::new(ErrorKind::ParseError {
            message: message.to_string(),
            found: token.kind.describe(),
            source_id: self.source_id.clone(),
            line: token.span.line,
            column: token.span.column,
            context: token.span.line_text(self.source).to_string(),
        })
    }

    fn context_for(&self, token: &Token) -> ErrorContext {
        ErrorContext::new()
            .with_source(self.source_id.clone())
            .with_position(token.span.line as usize, token.span.column as usize)
    }
}

/// Parses source text into a registry.
///
/// # Errors
/// Returns an error if the source cannot be parsed or a declaration is invalid.
pub fn parse(source: &str) -> Result<DeclarationRegistry> {
    Parser::new(source).parse_all()
}

/// Parses source text, reporting errors against `source_id`.
///
/// # Errors
/// Returns an error if the source cannot be parsed or a declaration is invalid.
pub fn parse_source(source_id: &str, source: &str) -> Result<DeclarationRegistry> {
    Parser::new(source).with_source_id(source_id).parse_all()
}
