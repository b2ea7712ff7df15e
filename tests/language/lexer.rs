//! Integration tests for the lexer
//!
//! Tests tokenization of complete DSL snippets.

use declc_language::{Keyword, Lexer, TokenKind};

fn significant(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn lex_record_declaration() {
    assert_eq!(
        significant("data Person = Person { ?int $age = 3 };"),
        vec![
            TokenKind::Keyword(Keyword::Data),
            TokenKind::Identifier("Person".into()),
            TokenKind::Equals,
            TokenKind::Identifier("Person".into()),
            TokenKind::LBrace,
            TokenKind::Question,
            TokenKind::Identifier("int".into()),
            TokenKind::Dollar,
            TokenKind::Identifier("age".into()),
            TokenKind::Equals,
            TokenKind::Int(3),
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_condition_arrow() {
    let kinds = significant("where age >= 18 => 'adult'");
    assert!(kinds.contains(&TokenKind::Arrow));
    assert!(kinds.contains(&TokenKind::String("adult".into())));
}

#[test]
fn lex_qualified_name() {
    assert_eq!(
        significant("\\App\\Person"),
        vec![
            TokenKind::Backslash,
            TokenKind::Identifier("App".into()),
            TokenKind::Backslash,
            TokenKind::Identifier("Person".into()),
            TokenKind::Eof,
        ]
    );
}

// =============================================================================
// Positions and Trivia
// =============================================================================

#[test]
fn block_comment_advances_lines() {
    let source = "/* one\ntwo\nthree */ data";
    let tokens = Lexer::tokenize_all(source);
    let data = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Keyword(Keyword::Data))
        .unwrap();
    assert_eq!(data.span.line, 3);
    assert_eq!(data.text(source), "data");
}

#[test]
fn line_comment_is_trivia() {
    let tokens = Lexer::tokenize_all("// comment\nmarker");
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert!(
        tokens
            .iter()
            .any(|t| t.kind == TokenKind::Keyword(Keyword::Marker) && t.span.line == 2)
    );
}

#[test]
fn string_escapes() {
    assert_eq!(
        significant(r#""a\nb\t\\c""#),
        vec![TokenKind::String("a\nb\t\\c".into()), TokenKind::Eof]
    );
}

#[test]
fn unknown_characters_never_fail() {
    let kinds = significant("data @ # ~");
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    assert!(kinds.contains(&TokenKind::Other('@')));
}
