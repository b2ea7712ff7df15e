//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use declc_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_declaration() {
    let err = Error::invalid_declaration("App\\Person", "data requires at least one constructor");
    assert!(matches!(err.kind, ErrorKind::InvalidDeclaration { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("App\\Person"));
    assert!(msg.contains("at least one constructor"));
}

#[test]
fn error_duplicate() {
    let err = Error::duplicate("App\\Person");
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration(ref name) if name == "App\\Person"));
    assert_eq!(format!("{err}"), "duplicate declaration: App\\Person");
}

#[test]
fn error_unsupported_conversion() {
    let err = Error::unsupported_conversion("App\\Shape", "FromArray", "App\\Drawing");
    assert!(matches!(err.kind, ErrorKind::UnsupportedConversion { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("App\\Shape"));
    assert!(msg.contains("FromArray"));
    assert!(msg.contains("App\\Drawing"));
    assert!(err.is_render_error());
}

#[test]
fn error_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = Error::io("out/App/Person.php", &io);
    match &err.kind {
        ErrorKind::Io { path, message } => {
            assert_eq!(path, "out/App/Person.php");
            assert_eq!(message, "denied");
        }
        other => panic!("expected Io, got {other:?}"),
    }
    assert!(!err.is_parse_error());
}

#[test]
fn error_internal() {
    let err = Error::internal("cursor past end");
    assert_eq!(format!("{err}"), "internal error: cursor past end");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn frames_accumulate_outermost_last() {
    let err = Error::unresolved_type("App\\Missing", "App\\Person")
        .with_frame("while rendering App\\Person")
        .with_frame("while compiling person.decl");
    let stack = &err.context.as_ref().unwrap().stack;
    assert_eq!(
        stack,
        &vec![
            "while rendering App\\Person".to_string(),
            "while compiling person.decl".to_string()
        ]
    );
}

#[test]
fn context_display() {
    let ctx = ErrorContext::new()
        .with_source("types.decl")
        .with_position(4, 12)
        .with_frame("while rendering App\\A");
    assert_eq!(format!("{ctx}"), "at types.decl:4:12\n  while rendering App\\A");
}

#[test]
fn frame_keeps_existing_context() {
    let err = Error::duplicate("A")
        .with_context(ErrorContext::new().with_source("a.decl"))
        .with_frame("while merging");
    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("a.decl"));
    assert_eq!(ctx.stack.len(), 1);
}
