//! Builders for `Exception` declarations.

use declc_foundation::Result;
use declc_language::{
    Argument, Constructor, Declaration, ExceptionConstructor, ExceptionOptions,
    template_references,
};

use super::construction::validation;
use super::structure::getters;
use crate::context::RenderContext;
use crate::php::{blocks, class_ref, method, parameters, string_literal, variables};
use crate::resolve::resolve;

const DEFAULT_PARENT: &str = "Exception";

pub(super) fn class_extends(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let Some(options) = declaration.exception_options() else {
        return Ok(fallback.to_string());
    };
    let parent = options.parent.as_deref().unwrap_or(DEFAULT_PARENT);
    Ok(format!(" extends {}", class_ref(parent, declaration.namespace())))
}

/// Fields first, then the usual `$message`, `$code` and `$previous`.
pub(super) fn constructor(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let (Some(options), Some(ctor)) = (declaration.exception_options(), constructor) else {
        return Ok(fallback.to_string());
    };
    let namespace = declaration.namespace();

    let mut params = parameters(ctor, namespace);
    if !params.is_empty() {
        params.push_str(", ");
    }
    params.push_str(&format!(
        "string $message = {}, int $code = 0, ?{} $previous = null",
        string_literal(options.default_message.as_deref().unwrap_or_default()),
        class_ref("Throwable", namespace)
    ));

    let assignments = ctor
        .arguments
        .iter()
        .map(|arg| format!("$this->{0} = ${0};", arg.name))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(method(
        &format!("public function __construct({params})"),
        &blocks([
            validation(declaration, ctor, namespace),
            "parent::__construct($message, $code, $previous);".to_string(),
            assignments,
        ]),
    ))
}

/// One named factory per sub-constructor, formatting its message.
pub(super) fn factories(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    let (Some(options), Some(ctor)) = (declaration.exception_options(), constructor) else {
        return Ok(fallback.to_string());
    };
    Ok(blocks(named_factories(ctx, declaration, ctor, options)))
}

fn named_factories(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    ctor: &Constructor,
    options: &ExceptionOptions,
) -> Vec<String> {
    let namespace = declaration.namespace();
    options
        .constructors
        .iter()
        .map(|factory| {
            let message = format_message(ctx, declaration, ctor, factory);
            let mut args = variables(ctor);
            if !args.is_empty() {
                args.push_str(", ");
            }
            args.push_str(&message);
            method(
                &format!(
                    "public static function {}({}): self",
                    factory.name,
                    parameters(ctor, namespace)
                ),
                &format!("return new self({args});"),
            )
        })
        .collect()
}

/// Turns `No user {{email}}` into `\sprintf('No user %s', $email)`.
fn format_message(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    ctor: &Constructor,
    factory: &ExceptionConstructor,
) -> String {
    let references = template_references(&factory.message);
    if references.is_empty() {
        return string_literal(&factory.message);
    }

    let mut format = String::with_capacity(factory.message.len());
    let mut values = Vec::with_capacity(references.len());
    let mut cursor = 0;
    for (range, name) in references {
        format.push_str(&factory.message[cursor..range.start].replace('%', "%%"));
        format.push_str("%s");
        cursor = range.end;
        if let Some(argument) = ctor.argument(name) {
            values.push(printable(ctx, declaration, argument));
        }
    }
    format.push_str(&factory.message[cursor..].replace('%', "%%"));

    format!("\\sprintf({}, {})", string_literal(&format), values.join(", "))
}

fn printable(ctx: &RenderContext<'_>, declaration: &Declaration, argument: &Argument) -> String {
    let variable = format!("${}", argument.name);
    if argument.is_list {
        return format!("\\json_encode({variable})");
    }
    resolve(ctx, argument)
        .to_plain(&variable, declaration.qualified_name())
        .map_or(variable, |(converted, _)| converted)
}

/// Getters only; exceptions are not copied with changes.
pub(super) fn accessors(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if declaration.exception_options().is_none() {
        return Ok(fallback.to_string());
    }
    getters(ctx, declaration, constructor, fallback)
}
