//! Builders for the message roles (`Command`, `Query`, `DomainEvent`,
//! `AggregateChanged`).
//!
//! Messages keep their fields in a plain payload array. The class gets a
//! `with(...)` factory converting arguments into the payload and one
//! accessor per field converting them back.

use declc_foundation::Result;
use declc_language::{Argument, Constructor, Declaration, DerivingKind};

use super::construction::validation;
use crate::config::MessageBase;
use crate::context::RenderContext;
use crate::php::{argument_type, block, blocks, class_ref, method, parameters, string_literal};
use crate::resolve::{PlainType, field_from_plain, field_to_plain, resolve};

fn message_base<'c>(ctx: &RenderContext<'c>, declaration: &Declaration) -> Option<&'c MessageBase> {
    declaration
        .message_role()
        .and_then(|role| ctx.config.messages.base_for(role))
}

fn is_aggregate_changed(declaration: &Declaration) -> bool {
    declaration.message_role() == Some(DerivingKind::AggregateChanged)
}

pub(super) fn class_extends(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let Some(base) = message_base(ctx, declaration) else {
        return Ok(fallback.to_string());
    };
    let namespace = declaration.namespace();
    let mut extends = format!(" extends {}", class_ref(&base.class, namespace));
    if !base.implements.is_empty() {
        let interfaces = base
            .implements
            .iter()
            .map(|i| class_ref(i, namespace))
            .collect::<Vec<_>>()
            .join(", ");
        extends.push_str(&format!(" implements {interfaces}"));
    }
    Ok(extends)
}

pub(super) fn traits(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let Some(base) = message_base(ctx, declaration) else {
        return Ok(fallback.to_string());
    };
    Ok(base
        .traits
        .iter()
        .map(|t| format!("use {};", class_ref(t, declaration.namespace())))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// `protected $messageName` when the declaration names its message.
pub(super) fn constants(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    Ok(match declaration.message_name() {
        Some(name) => format!("protected $messageName = {};", string_literal(name)),
        None => fallback.to_string(),
    })
}

/// Messages carry neither properties nor a constructor of their own.
fn nothing_for_messages(declaration: &Declaration, fallback: &str) -> Result<String> {
    Ok(if declaration.message_role().is_some() {
        String::new()
    } else {
        fallback.to_string()
    })
}

pub(super) fn properties(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    nothing_for_messages(declaration, fallback)
}

pub(super) fn constructor(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    nothing_for_messages(declaration, fallback)
}

/// `with(...)` building the payload.
pub(super) fn factories(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let (Some(ctor), Some(_)) = (constructor, declaration.message_role()) else {
        return Ok(fallback.to_string());
    };
    let namespace = declaration.namespace();
    let owner = declaration.qualified_name();

    let (aggregate_id, payload_arguments): (Option<&Argument>, &[Argument]) =
        if is_aggregate_changed(declaration) {
            match ctor.arguments.split_first() {
                Some((id, rest)) => (Some(id), rest),
                None => (None, ctor.arguments.as_slice()),
            }
        } else {
            (None, ctor.arguments.as_slice())
        };

    let mut entries = Vec::with_capacity(payload_arguments.len());
    for argument in payload_arguments {
        let value = format!("${}", argument.name);
        entries.push(format!(
            "    {} => {},",
            string_literal(&argument.name),
            field_to_plain(&resolve(ctx, argument), argument, &value, owner)?
        ));
    }
    let payload = if entries.is_empty() {
        "[]".to_string()
    } else {
        format!("[\n{}\n]", entries.join("\n"))
    };

    let creation = match aggregate_id {
        Some(id) => {
            let variable = format!("${}", id.name);
            let (converted, plain) = resolve(ctx, id).to_plain(&variable, owner)?;
            let converted = if plain == PlainType::String {
                converted
            } else {
                format!("(string) {converted}")
            };
            format!("return self::occur({converted}, {payload});")
        }
        None => format!("return new self({payload});"),
    };

    Ok(method(
        &format!(
            "public static function with({}): self",
            parameters(ctor, namespace)
        ),
        &blocks([validation(declaration, ctor, namespace), creation]),
    ))
}

/// One accessor per field reading the payload.
pub(super) fn accessors(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let (Some(ctor), Some(_)) = (constructor, declaration.message_role()) else {
        return Ok(fallback.to_string());
    };
    let namespace = declaration.namespace();
    let owner = declaration.qualified_name();

    let mut getters = Vec::with_capacity(ctor.arguments.len());
    for (index, argument) in ctor.arguments.iter().enumerate() {
        let source = if index == 0 && is_aggregate_changed(declaration) {
            "$this->aggregateId()".to_string()
        } else {
            format!("$this->payload[{}]", string_literal(&argument.name))
        };
        let value = field_from_plain(&resolve(ctx, argument), argument, &source, namespace, owner)?;
        let returns = argument_type(argument, namespace)
            .map(|ty| format!(": {ty}"))
            .unwrap_or_default();
        getters.push(method(
            &format!("public function {}(){returns}", argument.name),
            &format!("return {value};"),
        ));
    }
    Ok(blocks(getters))
}

/// Messages are equal when their payloads (and aggregate ids) are.
pub(super) fn equals_body(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if declaration.message_role().is_none() {
        return Ok(fallback.to_string());
    }
    let comparison = if is_aggregate_changed(declaration) {
        "return $this->aggregateId() === $other->aggregateId()\n    && $this->payload() === $other->payload();"
    } else {
        "return $this->payload() === $other->payload();"
    };
    Ok(blocks([
        block("if (! $other instanceof self)", "return false;"),
        comparison.to_string(),
    ]))
}
