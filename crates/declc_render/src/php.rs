//! PHP syntax helpers shared by the builders.

use declc_foundation::split_qualified;
use declc_language::{Argument, Constructor, Lexer, Literal, TokenKind};

/// Renders a PHP string literal.
///
/// Plain text becomes a single-quoted literal. Text with control
/// characters, or with a `{{` that substitution would pick up, becomes a
/// double-quoted literal with those characters escaped.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let needs_escapes = value.contains(['\n', '\r', '\t']) || value.contains("{{");
    if !needs_escapes {
        return format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"));
    }

    let mut out = String::with_capacity(value.len() + 8);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '{' if chars.peek() == Some(&'{') => out.push_str("\\x7B"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Splits every `{{` in a quoted PHP string by concatenation.
fn split_braces(quoted: &str) -> String {
    let Some(quote) = quoted.chars().next().filter(|q| matches!(q, '\'' | '"')) else {
        return quoted.to_string();
    };
    let mut out = String::with_capacity(quoted.len() + 8);
    let mut chars = quoted.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '{' && chars.peek() == Some(&'{') {
            out.push(quote);
            out.push_str(" . ");
            out.push(quote);
        }
    }
    out
}

/// Renders a DSL literal as a PHP expression.
#[must_use]
pub fn literal(value: &Literal) -> String {
    match value {
        Literal::Null => "null".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Int(n) => n.to_string(),
        Literal::Float(n) => format!("{n:?}"),
        Literal::String(s) => string_literal(s),
        Literal::EmptyList => "[]".to_string(),
    }
}

/// Returns how code in `namespace` refers to the class `qualified`.
///
/// Classes in the same namespace are referenced by local name, everything
/// else is fully qualified.
#[must_use]
pub fn class_ref(qualified: &str, namespace: &str) -> String {
    let (class_namespace, local) = split_qualified(qualified);
    if class_namespace == namespace {
        local.to_string()
    } else {
        format!("\\{}", qualified.trim_start_matches('\\'))
    }
}

/// Lower-cases the first character.
#[must_use]
pub fn lcfirst(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Upper-cases the first character.
#[must_use]
pub fn ucfirst(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Returns the type declaration of an argument, `None` when untyped.
#[must_use]
pub fn argument_type(argument: &Argument, namespace: &str) -> Option<String> {
    let base = if argument.is_list {
        "array".to_string()
    } else {
        match (argument.builtin(), argument.class_name()) {
            (Some(builtin), _) => builtin.type_name().to_string(),
            (None, Some(class)) => class_ref(class, namespace),
            (None, None) => return None,
        }
    };
    if is_nullable(argument) {
        Some(format!("?{base}"))
    } else {
        Some(base)
    }
}

/// Returns true if the argument accepts `null`, explicitly or through its default.
#[must_use]
pub fn is_nullable(argument: &Argument) -> bool {
    argument.nullable || argument.default == Some(Literal::Null)
}

/// Renders a parameter declaration, optionally with its default.
#[must_use]
pub fn parameter(argument: &Argument, namespace: &str, with_default: bool) -> String {
    let mut out = String::new();
    if let Some(ty) = argument_type(argument, namespace) {
        out.push_str(&ty);
        out.push(' ');
    }
    out.push('$');
    out.push_str(&argument.name);
    if with_default {
        if let Some(default) = &argument.default {
            out.push_str(" = ");
            out.push_str(&literal(default));
        }
    }
    out
}

/// Renders the parameter list of a constructor.
#[must_use]
pub fn parameters(constructor: &Constructor, namespace: &str) -> String {
    constructor
        .arguments
        .iter()
        .map(|a| parameter(a, namespace, true))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders `$a, $b, ...` for a constructor's arguments.
#[must_use]
pub fn variables(constructor: &Constructor) -> String {
    constructor
        .arguments
        .iter()
        .map(|a| format!("${}", a.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a guard throwing `\InvalidArgumentException` when `failure` holds.
#[must_use]
pub fn guard(failure: &str, message: &str) -> String {
    block(
        &format!("if ({failure})"),
        &format!("throw new \\InvalidArgumentException({});", string_literal(message)),
    )
}

/// Renders `signature` followed by a braced, indented `body`.
#[must_use]
pub fn method(signature: &str, body: &str) -> String {
    format!("{signature}\n{{\n{}\n}}", indent_body(body))
}

/// Renders a control structure with its opening brace on the same line.
#[must_use]
pub fn block(head: &str, body: &str) -> String {
    format!("{head} {{\n{}\n}}", indent_body(body))
}

fn indent_body(body: &str) -> String {
    body.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Joins code blocks with one blank line, skipping empty ones.
#[must_use]
pub fn blocks(parts: impl IntoIterator<Item = String>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rewrites bare argument names in a condition into PHP variables.
///
/// `age < 18` becomes `$age < 18` when `age` is an argument of the
/// constructor. Names after `$`, `->`, `::` or `\` and names called as
/// functions are left alone.
#[must_use]
pub fn rewrite_condition(expression: &str, constructor: &Constructor) -> String {
    let tokens = Lexer::tokenize_all(expression);
    let significant: Vec<usize> = (0..tokens.len())
        .filter(|&i| !tokens[i].kind.is_trivia())
        .collect();

    let mut out = String::with_capacity(expression.len() + 8);
    let mut cursor = 0;
    for (position, &index) in significant.iter().enumerate() {
        let token = &tokens[index];
        out.push_str(&expression[cursor..token.span.start]);
        cursor = token.span.end;

        let text = token.text(expression);
        let name = match &token.kind {
            TokenKind::Identifier(name) => name.as_str(),
            TokenKind::Keyword(keyword) => keyword.as_str(),
            TokenKind::String(_) if text.contains("{{") => {
                out.push_str(&split_braces(text));
                continue;
            }
            TokenKind::LBrace if out.ends_with('{') => {
                out.push(' ');
                out.push_str(text);
                continue;
            }
            _ => {
                out.push_str(text);
                continue;
            }
        };

        let before = position.checked_sub(1).map(|p| &tokens[significant[p]]);
        let before_that = position.checked_sub(2).map(|p| &tokens[significant[p]]);
        let after = significant.get(position + 1).map(|&i| &tokens[i]);

        let qualified = matches!(
            before.map(|t| &t.kind),
            Some(TokenKind::Dollar | TokenKind::DoubleColon | TokenKind::Backslash)
        );
        let member = matches!(
            (before_that.map(|t| &t.kind), before.map(|t| &t.kind)),
            (Some(TokenKind::Other('-')), Some(TokenKind::Other('>')))
        );
        let called = matches!(after.map(|t| &t.kind), Some(TokenKind::LParen));

        if !qualified && !member && !called && constructor.argument(name).is_some() {
            out.push('$');
        }
        out.push_str(text);
    }
    out.push_str(&expression[cursor..]);
    out
}
