//! Enum base and branch builders.

use declc_foundation::Result;
use declc_language::{Constructor, Declaration, EnumOptions};

use crate::context::RenderContext;
use crate::php::{blocks, class_ref, lcfirst, literal, method, string_literal};
use crate::shape::Shape;

fn enum_base<'a>(
    declaration: &'a Declaration,
    constructor: Option<&Constructor>,
) -> Option<&'a EnumOptions> {
    (Shape::of(declaration, constructor) == Shape::EnumBase)
        .then(|| declaration.enum_options())
        .flatten()
}

/// `'Red' => Red::class,` per option.
pub(super) fn options(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if enum_base(declaration, constructor).is_none() {
        return Ok(fallback.to_string());
    }
    Ok(declaration
        .constructors()
        .iter()
        .map(|ctor| {
            format!(
                "{} => {}::class,",
                string_literal(ctor.local_name()),
                class_ref(&ctor.name, declaration.namespace())
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// `'Red' => 0,` per option.
pub(super) fn values(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let Some(options) = enum_base(declaration, constructor) else {
        return Ok(fallback.to_string());
    };
    Ok(declaration
        .constructors()
        .iter()
        .enumerate()
        .map(|(i, ctor)| {
            format!(
                "{} => {},",
                string_literal(ctor.local_name()),
                literal(&options.value_of(ctor.local_name(), i))
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// One static factory per option, named like the option.
pub(super) fn factories(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if enum_base(declaration, constructor).is_none() {
        return Ok(fallback.to_string());
    }
    Ok(blocks(declaration.constructors().iter().map(|ctor| {
        method(
            &format!("public static function {}(): self", lcfirst(ctor.local_name())),
            &format!(
                "return new {}();",
                class_ref(&ctor.name, declaration.namespace())
            ),
        )
    })))
}

pub(super) fn to_string_body(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    Ok(match enum_base(declaration, constructor) {
        Some(options) if options.use_value => "return (string) $this->value();".to_string(),
        Some(_) => "return $this->name();".to_string(),
        None => fallback.to_string(),
    })
}

pub(super) fn name(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    Ok(match constructor {
        Some(ctor) if Shape::of(declaration, constructor) == Shape::EnumBranch => {
            string_literal(ctor.local_name())
        }
        _ => fallback.to_string(),
    })
}

pub(super) fn value(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let (Some(ctor), Some(options)) = (constructor, declaration.enum_options()) else {
        return Ok(fallback.to_string());
    };
    let Some(index) = declaration.constructor_index(ctor) else {
        return Ok(fallback.to_string());
    };
    Ok(literal(&options.value_of(ctor.local_name(), index)))
}
