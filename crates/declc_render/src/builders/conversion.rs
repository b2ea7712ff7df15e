//! Array, scalar and string conversion builders.

use declc_foundation::{Error, Result};
use declc_language::{Argument, Constructor, Declaration, Literal};

use super::construction::loop_variable;
use super::{construct, field_owner, field_ref};
use crate::context::{RenderContext, artifact_namespace};
use crate::php::{block, blocks, guard, is_nullable, literal, string_literal};
use crate::resolve::{PlainType, ResolvedType, field_from_plain, field_to_plain, resolve};

/// Returns the only argument of the artifact's constructor.
fn sole_argument<'a>(
    declaration: &Declaration,
    constructor: Option<&'a Constructor>,
) -> Option<&'a Argument> {
    field_owner(declaration, constructor).and_then(|ctor| ctor.arguments.first())
}

// =============================================================================
// Arrays
// =============================================================================

pub(super) fn to_array_body(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(ctor) = field_owner(declaration, constructor) else {
        return Ok(String::new());
    };
    let owner = declaration.qualified_name();
    let mut entries = Vec::with_capacity(ctor.arguments.len());
    for argument in &ctor.arguments {
        let ty = resolve(ctx, argument);
        let value = field_ref(declaration, "$this", &argument.name);
        entries.push(format!(
            "    {} => {},",
            string_literal(&argument.name),
            field_to_plain(&ty, argument, &value, owner)?
        ));
    }
    Ok(format!("return [\n{}\n];", entries.join("\n")))
}

/// Validates every key of `$data` before building the instance.
pub(super) fn from_array_body(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(ctor) = field_owner(declaration, constructor) else {
        return Ok(String::new());
    };
    let namespace = artifact_namespace(declaration, constructor);
    let owner = declaration.qualified_name();
    let item = loop_variable(ctor);

    let mut parts = Vec::with_capacity(ctor.arguments.len() + 1);
    let mut locals = Vec::with_capacity(ctor.arguments.len());
    for argument in &ctor.arguments {
        let ty = resolve(ctx, argument);
        let local = local_variable(argument);
        parts.push(read_key(&ty, argument, &local, &item, namespace, owner)?);
        locals.push(local);
    }
    parts.push(format!("return {};", construct(declaration, &locals.join(", "))));
    Ok(blocks(parts))
}

fn local_variable(argument: &Argument) -> String {
    if argument.name == "data" {
        "$data_".to_string()
    } else {
        format!("${}", argument.name)
    }
}

fn read_key(
    ty: &ResolvedType<'_>,
    argument: &Argument,
    local: &str,
    item: &str,
    namespace: &str,
    owner: &str,
) -> Result<String> {
    let key = string_literal(&argument.name);
    let entry = format!("$data[{key}]");
    let optional = is_nullable(argument) || argument.default.is_some();
    let (element, plain) = ty.from_plain(item, namespace, owner)?;

    let (checked, assign) = if argument.is_list {
        let element_check = plain.check(item).map(|check| {
            guard(
                &format!("! {check}"),
                &format!("Value in \"{}\" is not {}", argument.name, plain.describe()),
            )
        });
        let loop_body = blocks(element_check.into_iter().chain([format!("{local}[] = {element};")]));
        (
            PlainType::Array,
            blocks([
                format!("{local} = [];"),
                block(&format!("foreach ({entry} as {item})"), &loop_body),
            ]),
        )
    } else {
        let (value, _) = ty.from_plain(&entry, namespace, owner)?;
        (plain, format!("{local} = {value};"))
    };

    if optional {
        let default = argument.default.as_ref().unwrap_or(&Literal::Null);
        let check = checked.check(&entry).map(|check| {
            guard(
                &format!("! {check}"),
                &format!("Value for \"{}\" is not {}", argument.name, checked.describe()),
            )
        });
        let present = if checked == PlainType::Mixed {
            format!("\\array_key_exists({key}, $data)")
        } else {
            format!("isset({entry})")
        };
        return Ok(blocks([
            format!("{local} = {};", literal(default)),
            block(
                &format!("if ({present})"),
                &blocks(check.into_iter().chain([assign])),
            ),
        ]));
    }

    let missing = match checked.check(&entry) {
        Some(check) => guard(
            &format!("! isset({entry}) || ! {check}"),
            &format!(
                "Key \"{}\" is missing in data array or is not {}",
                argument.name,
                checked.describe()
            ),
        ),
        None => guard(
            &format!("! \\array_key_exists({key}, $data)"),
            &format!("Key \"{}\" is missing in data array", argument.name),
        ),
    };
    Ok(blocks([missing, assign]))
}

// =============================================================================
// Scalars
// =============================================================================

fn return_type(plain: PlainType, nullable: bool) -> String {
    match plain.type_declaration() {
        Some(ty) if nullable => format!("?{ty}"),
        Some(ty) => ty.to_string(),
        None => String::new(),
    }
}

pub(super) fn to_scalar_return(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(argument) = sole_argument(declaration, constructor) else {
        return Ok(String::new());
    };
    let (_, plain) = resolve(ctx, argument).to_plain("$value", declaration.qualified_name())?;
    let ty = return_type(plain, is_nullable(argument));
    Ok(if ty.is_empty() { ty } else { format!(": {ty}") })
}

pub(super) fn to_scalar_body(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(argument) = sole_argument(declaration, constructor) else {
        return Ok(String::new());
    };
    let value = field_ref(declaration, "$this", &argument.name);
    let converted = field_to_plain(
        &resolve(ctx, argument),
        argument,
        &value,
        declaration.qualified_name(),
    )?;
    Ok(format!("return {converted};"))
}

pub(super) fn from_scalar_param(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(argument) = sole_argument(declaration, constructor) else {
        return Ok(String::new());
    };
    let namespace = artifact_namespace(declaration, constructor);
    let (_, plain) =
        resolve(ctx, argument).from_plain("$value", namespace, declaration.qualified_name())?;
    let ty = return_type(plain, is_nullable(argument));
    Ok(if ty.is_empty() {
        "$value".to_string()
    } else {
        format!("{ty} $value")
    })
}

pub(super) fn from_scalar_body(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(argument) = sole_argument(declaration, constructor) else {
        return Ok(String::new());
    };
    let namespace = artifact_namespace(declaration, constructor);
    let converted = field_from_plain(
        &resolve(ctx, argument),
        argument,
        "$value",
        namespace,
        declaration.qualified_name(),
    )?;
    Ok(format!("return {};", construct(declaration, &converted)))
}

// =============================================================================
// Strings
// =============================================================================

fn string_conversion_error(argument: &Argument, conversion: &str, owner: &str) -> Error {
    Error::unsupported_conversion(
        argument.type_hint.as_deref().unwrap_or("mixed"),
        conversion,
        owner,
    )
}

pub(super) fn to_string_body(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(argument) = sole_argument(declaration, constructor) else {
        return Ok(String::new());
    };
    let owner = declaration.qualified_name();
    let value = field_ref(declaration, "$this", &argument.name);
    let (converted, plain) = resolve(ctx, argument).to_plain(&value, owner)?;
    match plain {
        PlainType::String => Ok(format!("return {converted};")),
        PlainType::Mixed if converted == value => Ok(format!("return (string) {converted};")),
        PlainType::Mixed => Ok(format!("return (string) ({converted});")),
        _ => Err(string_conversion_error(argument, "conversion to a string", owner)),
    }
}

pub(super) fn from_string_param(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok(match sole_argument(declaration, constructor) {
        Some(argument) if is_nullable(argument) => "?string $value".to_string(),
        Some(_) => "string $value".to_string(),
        None => String::new(),
    })
}

pub(super) fn from_string_body(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(argument) = sole_argument(declaration, constructor) else {
        return Ok(String::new());
    };
    let owner = declaration.qualified_name();
    let namespace = artifact_namespace(declaration, constructor);
    let ty = resolve(ctx, argument);
    let (_, plain) = ty.from_plain("$value", namespace, owner)?;
    if !matches!(plain, PlainType::String | PlainType::Mixed) {
        return Err(string_conversion_error(argument, "construction from a string", owner));
    }
    let converted = field_from_plain(&ty, argument, "$value", namespace, owner)?;
    Ok(format!("return {};", construct(declaration, &converted)))
}
