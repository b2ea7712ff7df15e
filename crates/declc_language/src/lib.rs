//! Lexer, parser, declaration model and registry for the declc DSL.
//!
//! This crate provides:
//! - `Lexer` - Tokenization of DSL source
//! - `Parser` - Parsing tokens into validated declarations
//! - `Declaration` - The immutable declaration model with derivings
//! - `DeclarationRegistry` - The cross-file symbol table

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod declaration;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod span;
pub mod token;

pub use declaration::{
    ALL_CONSTRUCTORS, Argument, BuiltinType, Condition, Constructor, Declaration,
    DeclarationBuilder, DeclarationKind, Deriving, DerivingKind, EnumOptions,
    ExceptionConstructor, ExceptionOptions, Literal, template_references,
};
pub use lexer::Lexer;
pub use parser::{ANONYMOUS_SOURCE, Parser, parse, parse_source};
pub use registry::DeclarationRegistry;
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
