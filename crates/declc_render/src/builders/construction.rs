//! Constructors, guards and branch factories.

use declc_foundation::Result;
use declc_language::{Argument, BuiltinType, Constructor, Declaration};

use super::field_owner;
use crate::context::{RenderContext, artifact_namespace};
use crate::php::{
    block, blocks, class_ref, guard, is_nullable, lcfirst, method, parameters, rewrite_condition,
    variables,
};
use crate::resolve::PlainType;
use crate::shape::Shape;

/// `__construct` checking list elements and conditions, then assigning fields.
pub(super) fn constructor(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    let Some(ctor) = field_owner(declaration, constructor) else {
        return Ok(String::new());
    };
    let namespace = artifact_namespace(declaration, constructor);
    let assignments = ctor
        .arguments
        .iter()
        .map(|arg| format!("$this->{} = {};", arg.name, assigned_value(arg)))
        .collect::<Vec<_>>()
        .join("\n");
    let body = blocks([validation(declaration, ctor, namespace), assignments]);
    Ok(method(
        &format!("public function __construct({})", parameters(ctor, namespace)),
        &body,
    ))
}

/// Static factories on a sum base, one per branch.
pub(super) fn factories(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    constructor: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    if Shape::of(declaration, constructor) != Shape::SumBase {
        return Ok(String::new());
    }
    let namespace = declaration.namespace();
    Ok(blocks(declaration.constructors().iter().map(|ctor| {
        method(
            &format!(
                "public static function {}({}): self",
                lcfirst(ctor.local_name()),
                parameters(ctor, namespace)
            ),
            &format!(
                "return new {}({});",
                class_ref(&ctor.name, namespace),
                variables(ctor)
            ),
        )
    })))
}

/// Element checks for typed lists followed by the declaration's conditions.
pub(super) fn validation(
    declaration: &Declaration,
    ctor: &Constructor,
    namespace: &str,
) -> String {
    let element = loop_variable(ctor);
    let element_checks = ctor
        .arguments
        .iter()
        .filter(|arg| arg.is_list)
        .filter_map(|arg| element_check(arg, &element, namespace));
    let conditions = declaration.conditions_for(ctor).map(|condition| {
        guard(
            &rewrite_condition(&condition.expression, ctor),
            &condition.message,
        )
    });
    blocks(element_checks.chain(conditions))
}

fn element_check(argument: &Argument, element: &str, namespace: &str) -> Option<String> {
    let failure = match (argument.builtin(), argument.class_name()) {
        (Some(builtin), _) => format!("! {}", PlainType::of_builtin(builtin).check(element)?),
        (None, Some(class)) => format!("! {element} instanceof {}", class_ref(class, namespace)),
        (None, None) => return None,
    };
    let expected = argument.type_hint.as_deref().unwrap_or("mixed");
    let source = if is_nullable(argument) {
        format!("${} ?? []", argument.name)
    } else {
        format!("${}", argument.name)
    };
    Some(block(
        &format!("foreach ({source} as {element})"),
        &guard(
            &failure,
            &format!("Expected ${} to contain only {expected}", argument.name),
        ),
    ))
}

fn assigned_value(argument: &Argument) -> String {
    let variable = format!("${}", argument.name);
    if argument.is_list && argument.builtin() == Some(BuiltinType::Float) {
        let cast = format!("\\array_map(static fn ($value) => (float) $value, {variable})");
        if is_nullable(argument) {
            format!("null === {variable} ? null : {cast}")
        } else {
            cast
        }
    } else {
        variable
    }
}

/// Returns a loop variable that shadows no argument.
pub(super) fn loop_variable(ctor: &Constructor) -> String {
    let mut name = "item".to_string();
    while ctor.argument(&name).is_some() {
        name.push('_');
    }
    format!("${name}")
}
