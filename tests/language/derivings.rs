//! Integration tests for deriving validation
//!
//! Every deriving checks its structural precondition when a declaration is
//! built; conflicting combinations are rejected.

use declc_foundation::ErrorKind;
use declc_language::parse;

fn rejected_deriving(source: &str) -> String {
    match parse(source).unwrap_err().kind {
        ErrorKind::InvalidDeriving { deriving, .. } => deriving,
        other => panic!("expected InvalidDeriving, got {other:?}"),
    }
}

// =============================================================================
// Structural Rules
// =============================================================================

#[test]
fn conversions_need_arguments() {
    assert_eq!(rejected_deriving("data A = A deriving (ToArray);"), "ToArray");
    assert_eq!(rejected_deriving("data A = String deriving (FromArray);"), "FromArray");
    assert_eq!(
        rejected_deriving("data A = A { int $x, int $y } deriving (ToScalar);"),
        "ToScalar"
    );
    assert_eq!(
        rejected_deriving("data A = A { int[] $x } deriving (FromScalar);"),
        "FromScalar"
    );
    assert_eq!(
        rejected_deriving("data A = A { int $x } deriving (ToString);"),
        "ToString"
    );
}

#[test]
fn accepted_conversions() {
    let ok = [
        "data A = A { int $x } deriving (ToArray, FromArray, ToScalar, FromScalar);",
        "data A = String deriving (ToString, FromString);",
        "data A = A { $raw } deriving (ToString);",
        "data A = A { \\DateTimeImmutable $at } deriving (ToString);",
        "data A = Circle { float $r } | Point { int $x } deriving (ToArray, Equals);",
    ];
    for source in ok {
        assert!(parse(source).is_ok(), "{source}");
    }
}

#[test]
fn enum_rules() {
    assert_eq!(rejected_deriving("data A = Red deriving (Enum);"), "Enum");
    assert_eq!(rejected_deriving("data A = Red { int $x } | Blue deriving (Enum);"), "Enum");
    assert_eq!(
        rejected_deriving("data A = Red | Blue deriving (Enum) with (Red: 1);"),
        "Enum"
    );
    assert_eq!(
        rejected_deriving("data A = Red | Blue deriving (Enum) where _: true => 'never';"),
        "Enum"
    );
    assert!(parse("data A = Red | Blue deriving (Enum) with (Red: 1, Blue: 2);").is_ok());
}

#[test]
fn uuid_rules() {
    assert_eq!(rejected_deriving("data Id = Id { string $v } deriving (Uuid);"), "Uuid");
    assert_eq!(rejected_deriving("data Id = A | B deriving (Uuid);"), "Uuid");
    assert!(parse("data Id = Id deriving (Uuid);").is_ok());
}

#[test]
fn message_rules() {
    assert_eq!(rejected_deriving("data C = A | B deriving (Command);"), "Command");
    assert_eq!(
        rejected_deriving("data E = E deriving (AggregateChanged);"),
        "AggregateChanged"
    );
    assert_eq!(
        rejected_deriving("data E = E { ?Id $id } deriving (AggregateChanged);"),
        "AggregateChanged"
    );
    assert!(parse("data Q = Q deriving (Query);").is_ok());
    assert!(parse("data E = E { Id $id, int $n } deriving (AggregateChanged);").is_ok());
}

#[test]
fn exception_rules() {
    assert_eq!(
        rejected_deriving("data X = X { string $message } deriving (Exception);"),
        "Exception"
    );
    assert_eq!(
        rejected_deriving("data X = X { int $id } deriving (Exception(withId: 'missing {{$other}}'));"),
        "Exception"
    );
    assert_eq!(
        rejected_deriving(
            "data X = X { int $id } deriving (Exception(withId: 'a', withId: 'b'));"
        ),
        "Exception"
    );
    assert!(
        parse("data X = X { int $id } deriving (Exception(withId: 'No {{id}}'): 'Failed');")
            .is_ok()
    );
}

#[test]
fn exception_arguments_cannot_shadow_exception_properties() {
    for name in ["message", "code", "previous", "file", "line"] {
        let source = format!("data X = X {{ string ${name} }} deriving (Exception);");
        assert_eq!(rejected_deriving(&source), "Exception", "${name} accepted");
    }
    assert!(parse("data X = X { string $filename, int $lineNumber } deriving (Exception);").is_ok());
}

// =============================================================================
// Conflicts
// =============================================================================

#[test]
fn conflicting_derivings() {
    let conflicts = [
        ("data A = Red | Blue deriving (Enum, Equals);", "Equals"),
        ("data A = A deriving (Uuid, Equals);", "Equals"),
        ("data A = A { int $x } deriving (Command, Query);", "Query"),
        ("data A = A { int $x } deriving (Command, ToArray);", "ToArray"),
        ("data A = A { int $x } deriving (Exception, FromArray);", "FromArray"),
        ("data A = A { int $x } deriving (DomainEvent, Exception);", "Exception"),
    ];
    for (source, deriving) in conflicts {
        assert_eq!(rejected_deriving(source), deriving, "{source}");
    }
}

#[test]
fn duplicate_deriving() {
    assert_eq!(
        rejected_deriving("data A = A { int $x } deriving (ToArray, ToArray);"),
        "ToArray"
    );
}
