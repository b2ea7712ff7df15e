//! Qualified names.
//!
//! Declarations, constructors and type references are identified by a
//! namespace and a local name joined with [`NAMESPACE_SEPARATOR`]. The root
//! namespace is the empty string.

/// Separator between namespace segments in qualified names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Joins a namespace and a local name into a qualified name.
#[must_use]
pub fn join_qualified(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
    }
}

/// Splits a qualified name into `(namespace, local name)`.
///
/// A leading separator is ignored.
#[must_use]
pub fn split_qualified(qualified: &str) -> (&str, &str) {
    let qualified = qualified.trim_start_matches(NAMESPACE_SEPARATOR);
    match qualified.rfind(NAMESPACE_SEPARATOR) {
        Some(i) => (&qualified[..i], &qualified[i + 1..]),
        None => ("", qualified),
    }
}

/// Returns true if `s` is a valid identifier: `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
