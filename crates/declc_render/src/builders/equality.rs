//! `equals()` builders.

use declc_foundation::Result;
use declc_language::{Argument, Constructor, Declaration};

use super::{field_owner, field_ref};
use crate::context::{RenderContext, artifact_namespace};
use crate::php::{block, blocks, class_ref, is_nullable};
use crate::resolve::{ResolvedType, resolve};
use crate::shape::Shape;

pub(super) fn equals_type(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(match Shape::of(declaration, constructor) {
        Shape::SumBranch => format!(
            "?{}",
            class_ref(
                declaration.qualified_name(),
                artifact_namespace(declaration, constructor)
            )
        ),
        _ => "?self".to_string(),
    })
}

/// Compares every field, returning `false` at the first difference.
pub(super) fn equals_body(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let owner = declaration.qualified_name();
    let mut parts = vec![block("if (! $other instanceof self)", "return false;")];
    if let Some(ctor) = field_owner(declaration, constructor) {
        for argument in &ctor.arguments {
            let ty = resolve(ctx, argument);
            let this = field_ref(declaration, "$this", &argument.name);
            let other = field_ref(declaration, "$other", &argument.name);
            parts.push(field_check(&ty, argument, &this, &other, owner)?);
        }
    }
    parts.push("return true;".to_string());
    Ok(blocks(parts))
}

fn field_check(
    ty: &ResolvedType<'_>,
    argument: &Argument,
    this: &str,
    other: &str,
    owner: &str,
) -> Result<String> {
    if !argument.is_list {
        let same = ty.equals(this, other, owner)?;
        let same = if is_nullable(argument) && !ty.is_plain() {
            format!("(null === {this} || null === {other} ? {this} === {other} : {same})")
        } else {
            same
        };
        return Ok(block(&format!("if ({})", negate(&same, this, other)), "return false;"));
    }

    if ty.is_plain() {
        return Ok(block(&format!("if ({this} !== {other})"), "return false;"));
    }

    let (this_list, other_list, null_check) = if is_nullable(argument) {
        (
            format!("{this} ?? []"),
            format!("{other} ?? []"),
            block(
                &format!("if ((null === {this}) !== (null === {other}))"),
                "return false;",
            ),
        )
    } else {
        (this.to_string(), other.to_string(), String::new())
    };
    let other_item = if other_list.contains(' ') {
        format!("({other_list})[$key]")
    } else {
        format!("{other_list}[$key]")
    };
    let same = ty.equals("$item", &other_item, owner)?;
    Ok(blocks([
        null_check,
        block(
            &format!("if (\\count({this_list}) !== \\count({other_list}))"),
            "return false;",
        ),
        block(
            &format!("foreach ({this_list} as $key => $item)"),
            &block(
                &format!(
                    "if (! \\array_key_exists($key, {other_list}) || {})",
                    negate(&same, "$item", &other_item)
                ),
                "return false;",
            ),
        ),
    ]))
}

/// Negates a comparison, keeping plain identity checks readable.
fn negate(same: &str, this: &str, other: &str) -> String {
    if same == format!("{this} === {other}") {
        format!("{this} !== {other}")
    } else if same.contains(' ') && !is_parenthesised(same) {
        format!("! ({same})")
    } else {
        format!("! {same}")
    }
}

/// Whether the whole expression sits inside one outer pair of parentheses.
fn is_parenthesised(expression: &str) -> bool {
    if !expression.starts_with('(') || !expression.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in expression.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == expression.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}
