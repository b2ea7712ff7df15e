//! Builders for `Uuid` declarations.

use declc_foundation::Result;
use declc_language::{Constructor, Declaration, DerivingKind};

use crate::context::RenderContext;
use crate::php::{blocks, class_ref, method};

fn is_uuid(declaration: &Declaration) -> bool {
    declaration.has_deriving(DerivingKind::Uuid)
}

pub(super) fn properties(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if !is_uuid(declaration) {
        return Ok(fallback.to_string());
    }
    Ok(format!(
        "private {} $uuid;",
        class_ref(&ctx.config.uuid.interface, declaration.namespace())
    ))
}

/// Private constructor; instances come from `generate()` and `fromString()`.
pub(super) fn constructor(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if !is_uuid(declaration) {
        return Ok(fallback.to_string());
    }
    Ok(method(
        &format!(
            "private function __construct({} $uuid)",
            class_ref(&ctx.config.uuid.interface, declaration.namespace())
        ),
        "$this->uuid = $uuid;",
    ))
}

pub(super) fn factories(
    ctx: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if !is_uuid(declaration) {
        return Ok(fallback.to_string());
    }
    let factory = class_ref(&ctx.config.uuid.factory, declaration.namespace());
    Ok(blocks([
        method(
            "public static function generate(): self",
            &format!("return new self({factory}::uuid4());"),
        ),
        method(
            "public static function fromString(string $uuid): self",
            &format!("return new self({factory}::fromString($uuid));"),
        ),
    ]))
}

pub(super) fn methods(
    _: &RenderContext<'_>,
    declaration: &Declaration,
    _: Option<&Constructor>,
    fallback: &str,
) -> Result<String> {
    if !is_uuid(declaration) {
        return Ok(fallback.to_string());
    }
    Ok(blocks([
        method(
            "public function toString(): string",
            "return $this->uuid->toString();",
        ),
        method(
            "public function __toString(): string",
            "return $this->uuid->toString();",
        ),
        method(
            "public function equals(?self $other): bool",
            "return null !== $other && $this->uuid->equals($other->uuid);",
        ),
    ]))
}
