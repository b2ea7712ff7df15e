//! Integration tests for Layer 1: Language
//!
//! Tests for lexer, parser, deriving validation and the registry.

mod derivings;
mod lexer;
mod registry;
