//! Integration tests for the declaration registry
//!
//! Tests uniqueness, type resolution and persistent merging.

use declc_foundation::ErrorKind;
use declc_language::{Declaration, DeclarationRegistry, parse};

fn registry(source: &str) -> DeclarationRegistry {
    parse(source).unwrap()
}

// =============================================================================
// Uniqueness
// =============================================================================

#[test]
fn duplicate_names_rejected() {
    let err = parse("namespace App; data A = String; data A = Int;").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration(_)));
}

#[test]
fn constructor_shadowing_a_declaration_rejected() {
    let err = parse("namespace App; data Circle = Float; data Shape = Circle { float $r } | Point;")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration(_)));
}

#[test]
fn constructor_shared_by_two_declarations_rejected() {
    let err = parse(
        "namespace App;
         data Shape = Circle { float $r } | Point;
         data Place = City { string $name } | Point;",
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration(_)));
}

#[test]
fn same_local_name_in_different_namespaces() {
    let registry = registry("namespace A { data Id = Int; } namespace B { data Id = Int; }");
    assert_eq!(registry.len(), 2);
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn resolve_by_name_then_constructor() {
    let registry = registry(
        "namespace App;
         data Shape = Circle { float $r } | Square { float $s };
         data Email = String;",
    );
    assert_eq!(registry.resolve_type("App\\Email").map(Declaration::name), Some("Email"));
    assert_eq!(registry.resolve_type("App\\Square").map(Declaration::name), Some("Shape"));
    assert!(registry.resolve_type("App\\Missing").is_none());
    assert!(registry.owner_of_constructor("App\\Circle").is_some());
    assert!(registry.owner_of_constructor("App\\Email").is_none());
}

// =============================================================================
// Merge
// =============================================================================

#[test]
fn merge_is_ordered_and_pure() {
    let left = registry("namespace App; data A = String; data B = Int;");
    let right = registry("namespace App; data C = Bool;");

    let merged = left.merge(&right).unwrap();
    assert_eq!(merged.names(), vec!["App\\A", "App\\B", "App\\C"]);
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 1);
}

#[test]
fn merge_of_disjoint_registries_has_same_members_either_way() {
    let left = registry("namespace App; data A = String;");
    let right = registry("namespace Other; data A = String;");

    let mut forward: Vec<String> = left.merge(&right).unwrap().names().into_iter().map(String::from).collect();
    let mut backward: Vec<String> = right.merge(&left).unwrap().names().into_iter().map(String::from).collect();
    forward.sort();
    backward.sort();
    assert_eq!(forward, backward);
}

#[test]
fn merge_conflict_leaves_inputs_untouched() {
    let left = registry("namespace App; data A = String;");
    let right = registry("namespace App; data A = Int;");
    let err = left.merge(&right).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration(_)));
    assert_eq!(left.len(), 1);
}
