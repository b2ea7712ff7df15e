//! Integration tests for qualified names

use declc_foundation::{NAMESPACE_SEPARATOR, is_identifier, join_qualified, split_qualified};
use proptest::prelude::*;

#[test]
fn join_and_split_agree() {
    for (namespace, name) in [("", "Person"), ("App", "Person"), ("App\\Model", "Person")] {
        let qualified = join_qualified(namespace, name);
        assert_eq!(split_qualified(&qualified), (namespace, name));
    }
}

#[test]
fn split_ignores_leading_separator() {
    assert_eq!(split_qualified("\\DateTimeImmutable"), ("", "DateTimeImmutable"));
}

#[test]
fn separator_is_backslash() {
    assert_eq!(NAMESPACE_SEPARATOR, '\\');
}

proptest! {
    #[test]
    fn identifiers_match_their_pattern(candidate in "[A-Za-z0-9_\\\\-]{0,12}") {
        let mut chars = candidate.chars();
        let expected = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        prop_assert_eq!(is_identifier(&candidate), expected);
    }
}
