//! Caller-supplied builders, converters and limits.

use declc_foundation::{Error, ErrorKind, Result};
use declc_language::{Constructor, Declaration, parse};
use declc_render::{PlainType, RenderConfig, RenderContext, Renderer, TypeConverter};

use crate::{code, render_with};

const PERSON: &str = "namespace App; data Person = Person { string $name } deriving (ToArray);";

fn license_header(
    _: &RenderContext<'_>,
    _: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok("// Licensed under MIT.".to_string())
}

fn audit_traits(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    Ok(if declaration.name() == "Person" {
        "{{audit_trait}}".to_string()
    } else {
        fallback.to_string()
    })
}

fn audit_trait(
    _: &RenderContext<'_>,
    _: &Declaration,
    _: Option<&Constructor>,
    _: &str,
) -> Result<String> {
    Ok("use \\Lib\\Audited;".to_string())
}

fn ping(_: &RenderContext<'_>, _: &Declaration, _: Option<&Constructor>, _: &str) -> Result<String> {
    Ok("{{pong}}".to_string())
}

fn pong(_: &RenderContext<'_>, _: &Declaration, _: Option<&Constructor>, _: &str) -> Result<String> {
    Ok("{{ping}}".to_string())
}

fn failing(_: &RenderContext<'_>, _: &Declaration, _: Option<&Constructor>, _: &str) -> Result<String> {
    Err(Error::internal("custom builder failed"))
}

fn renderer(config: RenderConfig) -> Renderer {
    Renderer::new(config)
}

#[test]
fn prepended_builder_overrides_the_header() {
    let registry = parse(PERSON).unwrap();
    let mut renderer = renderer(RenderConfig::default());
    renderer.builders_mut().prepend("header", license_header);

    let output = renderer.render(&registry).unwrap();
    let person = code(&output, "App\\Person");
    assert!(person.starts_with("<?php\n\n// Licensed under MIT.\n\ndeclare(strict_types=1);"));
    assert!(!person.contains("generated by declc"));
}

#[test]
fn builder_output_is_expanded_in_later_passes() {
    let registry = parse(
        "namespace App;
         data Person = Person { string $name };
         data Robot = Robot { string $serial };",
    )
    .unwrap();
    let mut renderer = renderer(RenderConfig::default());
    renderer.builders_mut().prepend("traits", audit_traits);
    renderer.builders_mut().register("audit_trait", audit_trait);

    let output = renderer.render(&registry).unwrap();
    assert!(code(&output, "App\\Person").contains("final class Person\n{\n    use \\Lib\\Audited;\n\n    private string $name;"));
    assert!(!code(&output, "App\\Robot").contains("Audited"));
}

#[test]
fn endless_expansion_stops_at_the_pass_limit() {
    let registry = parse(PERSON).unwrap();
    let mut renderer = renderer(RenderConfig::default().with_max_passes(4));
    renderer.builders_mut().prepend("traits", ping);
    renderer.builders_mut().register("ping", ping);
    renderer.builders_mut().register("pong", pong);

    let err = renderer.render(&registry).unwrap_err();
    match err.kind {
        ErrorKind::UnresolvedPlaceholder { ref artifact, .. } => assert_eq!(artifact, "App\\Person"),
        ref other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn builder_errors_name_the_artifact() {
    let registry = parse(PERSON).unwrap();
    let mut renderer = renderer(RenderConfig::default());
    renderer.builders_mut().prepend("constants", failing);

    let err = renderer.render(&registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
    let context = err.context.unwrap();
    assert_eq!(context.stack, vec!["while rendering App\\Person".to_string()]);
}

#[test]
fn date_time_converter() {
    let output = render_with(
        "namespace App;
         data Meeting = Meeting { \\DateTimeImmutable $at } deriving (ToArray, FromArray);",
        RenderConfig::default().with_date_time_converter(),
    );
    let meeting = code(&output, "App\\Meeting");

    assert!(meeting.contains("'at' => $this->at->format(\\DATE_ATOM),"));
    assert!(meeting.contains("new \\DateTimeImmutable($data['at'])"));
}

#[test]
fn custom_converter() {
    let config = RenderConfig::default().with_converter(
        "Lib\\Money",
        TypeConverter::new("{value}->cents()", "\\Lib\\Money::ofCents({value})")
            .with_plain_type(PlainType::Int),
    );
    let output = render_with(
        "namespace App; data Price = Price { \\Lib\\Money $amount } deriving (ToArray);",
        config,
    );
    assert!(code(&output, "App\\Price").contains("'amount' => $this->amount->cents(),"));
}

#[test]
fn unconverted_external_class_is_rejected() {
    let registry = parse(
        "namespace App; data Meeting = Meeting { \\DateTimeImmutable $at } deriving (ToArray);",
    )
    .unwrap();
    let err = Renderer::default().render(&registry).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnresolvedType { ref type_name, .. } if type_name == "DateTimeImmutable"
    ));
}
