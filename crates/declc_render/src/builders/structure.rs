//! Generic builders for the class skeleton.

use declc_foundation::Result;
use declc_language::{Constructor, Declaration};

use super::{construct, field_owner};
use crate::context::{RenderContext, artifact_class, artifact_namespace};
use crate::php::{argument_type, blocks, class_ref, method, parameter, ucfirst};
use crate::shape::Shape;

pub(super) fn header(
    ctx: &RenderContext<'_>,
    _: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(ctx.config.header.clone())
}

pub(super) fn strict_types(
    ctx: &RenderContext<'_>,
    _: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(if ctx.config.strict_types {
        "declare(strict_types=1);".to_string()
    } else {
        String::new()
    })
}

pub(super) fn namespace(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let namespace = artifact_namespace(declaration, constructor);
    Ok(if namespace.is_empty() {
        String::new()
    } else {
        format!("namespace {namespace};")
    })
}

pub(super) fn class_keyword(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(if Shape::of(declaration, constructor).is_base() {
        "abstract ".to_string()
    } else {
        "final ".to_string()
    })
}

pub(super) fn class_name(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(artifact_class(declaration, constructor).to_string())
}

/// Branches extend their base.
pub(super) fn class_extends(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(match Shape::of(declaration, constructor) {
        Shape::SumBranch | Shape::EnumBranch => format!(
            " extends {}",
            class_ref(
                declaration.qualified_name(),
                artifact_namespace(declaration, constructor)
            )
        ),
        _ => String::new(),
    })
}

pub(super) fn marker_extends(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(declaration.parent_marker().map_or_else(String::new, |parent| {
        format!(" extends {}", class_ref(parent, declaration.namespace()))
    }))
}

pub(super) fn traits(
    _: &RenderContext<'_>,
    _: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(String::new())
}

pub(super) fn constants(
    _: &RenderContext<'_>,
    _: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(String::new())
}

/// One private property per field.
pub(super) fn properties(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(ctor) = field_owner(declaration, constructor) else {
        return Ok(String::new());
    };
    let namespace = artifact_namespace(declaration, constructor);
    Ok(ctor
        .arguments
        .iter()
        .map(|arg| format!("private {};", parameter(arg, namespace, false)))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Getters plus `withX` methods returning a modified copy.
pub(super) fn accessors(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let Some(ctor) = field_owner(declaration, constructor) else {
        return Ok(String::new());
    };
    let namespace = artifact_namespace(declaration, constructor);
    let getters = getters(ctx, declaration, constructor, fallback)?;
    let withers = ctor.arguments.iter().map(|arg| {
        let args = ctor
            .arguments
            .iter()
            .map(|other| {
                if other.name == arg.name {
                    format!("${}", arg.name)
                } else {
                    format!("$this->{}", other.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        method(
            &format!(
                "public function with{}({}): self",
                ucfirst(&arg.name),
                parameter(arg, namespace, false)
            ),
            &format!("return {};", construct(declaration, &args)),
        )
    });
    Ok(blocks(std::iter::once(getters).chain(withers)))
}

/// One getter per field, named like the field.
pub(super) fn getters(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(ctor) = field_owner(declaration, constructor) else {
        return Ok(String::new());
    };
    let namespace = artifact_namespace(declaration, constructor);
    Ok(blocks(ctor.arguments.iter().map(|arg| {
        let returns = argument_type(arg, namespace)
            .map(|ty| format!(": {ty}"))
            .unwrap_or_default();
        method(
            &format!("public function {}(){returns}", arg.name),
            &format!("return $this->{};", arg.name),
        )
    })))
}
