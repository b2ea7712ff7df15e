//! Artifact templates.
//!
//! A class artifact is the `CLASS` template whose `{{body}}` slot is filled
//! with the body fragment of its [`Shape`] followed by one fragment per
//! requested deriving. Every other `{{key}}` is left to the builders.
//! Fragments are written at column zero; substitution re-indents them to
//! the column of their slot.

use declc_language::DerivingKind;

use crate::shape::Shape;

/// Slot filled at composition time, before any builder runs.
pub const BODY_SLOT: &str = "body";

/// Class artifact.
pub const CLASS: &str = "<?php

{{header}}

{{strict_types}}

{{namespace}}

{{class_keyword}}class {{class_name}}{{class_extends}}
{
    {{traits}}

    {{constants}}

    {{properties}}

    {{body}}
}
";

/// Marker artifact.
pub const INTERFACE: &str = "<?php

{{header}}

{{strict_types}}

{{namespace}}

interface {{class_name}}{{marker_extends}}
{
}
";

/// Body of single classes and sum branches.
pub const CLASS_BODY: &str = "{{constructor}}

{{factories}}

{{accessors}}";

/// Body of sum bases.
pub const SUM_BASE_BODY: &str = "{{factories}}";

/// Body of enum bases.
pub const ENUM_BASE_BODY: &str = "public const OPTIONS = [
    {{enum_options}}
];

public const VALUES = [
    {{enum_values}}
];

{{enum_factories}}

public static function fromName(string $name): self
{
    if (! isset(self::OPTIONS[$name])) {
        throw new \\InvalidArgumentException('Unknown enum name given: ' . $name);
    }

    $class = self::OPTIONS[$name];

    return new $class();
}

public static function fromValue($value): self
{
    $name = \\array_search($value, self::VALUES, true);

    if (false === $name) {
        throw new \\InvalidArgumentException('Unknown enum value given');
    }

    return self::fromName($name);
}

public function equals(?self $other): bool
{
    return null !== $other && \\get_class($this) === \\get_class($other);
}

public function name(): string
{
    return static::NAME;
}

public function value()
{
    return static::VALUE;
}

public function toString(): string
{
    {{enum_to_string_body}}
}

public function __toString(): string
{
    return $this->toString();
}";

/// Body of enum branches.
pub const ENUM_BRANCH_BODY: &str = "public const NAME = {{enum_name}};

public const VALUE = {{enum_value}};";

const EQUALS: &str = "public function equals({{equals_type}} $other): bool
{
    {{equals_body}}
}";

const ABSTRACT_EQUALS: &str = "abstract public function equals({{equals_type}} $other): bool;";

const TO_ARRAY: &str = "public function toArray(): array
{
    {{to_array_body}}
}";

const ABSTRACT_TO_ARRAY: &str = "abstract public function toArray(): array;";

const FROM_ARRAY: &str = "public static function fromArray(array $data): self
{
    {{from_array_body}}
}";

const TO_SCALAR: &str = "public function toScalar(){{to_scalar_return}}
{
    {{to_scalar_body}}
}";

const ABSTRACT_TO_SCALAR: &str = "abstract public function toScalar();";

const FROM_SCALAR: &str = "public static function fromScalar({{from_scalar_param}}): self
{
    {{from_scalar_body}}
}";

const TO_STRING: &str = "public function toString(): string
{
    {{to_string_body}}
}";

const MAGIC_TO_STRING: &str = "public function __toString(): string
{
    return $this->toString();
}";

const FROM_STRING: &str = "public static function fromString({{from_string_param}}): self
{
    {{from_string_body}}
}";

const UUID: &str = "{{uuid_methods}}";

/// Returns the base template of a shape.
#[must_use]
pub const fn base_template(shape: Shape) -> &'static str {
    match shape {
        Shape::Marker => INTERFACE,
        _ => CLASS,
    }
}

/// Returns the body fragment of a shape; `None` for markers.
#[must_use]
pub const fn body_fragment(shape: Shape) -> Option<&'static str> {
    match shape {
        Shape::Marker => None,
        Shape::Single | Shape::SumBranch => Some(CLASS_BODY),
        Shape::SumBase => Some(SUM_BASE_BODY),
        Shape::EnumBase => Some(ENUM_BASE_BODY),
        Shape::EnumBranch => Some(ENUM_BRANCH_BODY),
    }
}

/// Returns the fragments a deriving contributes to an artifact of `shape`.
#[must_use]
pub fn deriving_fragments(kind: DerivingKind, shape: Shape) -> Vec<&'static str> {
    use DerivingKind as K;

    match (kind, shape) {
        (K::Equals, Shape::Single | Shape::SumBranch) => vec![EQUALS],
        (K::Equals, Shape::SumBase) => vec![ABSTRACT_EQUALS],
        (K::ToArray, Shape::Single | Shape::SumBranch) => vec![TO_ARRAY],
        (K::ToArray, Shape::SumBase) => vec![ABSTRACT_TO_ARRAY],
        (K::FromArray, Shape::Single | Shape::SumBranch) => vec![FROM_ARRAY],
        (K::ToScalar, Shape::Single | Shape::SumBranch) => vec![TO_SCALAR],
        (K::ToScalar, Shape::SumBase) => vec![ABSTRACT_TO_SCALAR],
        (K::FromScalar, Shape::Single | Shape::SumBranch) => vec![FROM_SCALAR],
        (K::ToString, Shape::Single) => vec![TO_STRING, MAGIC_TO_STRING],
        (K::ToString, Shape::SumBranch) => vec![TO_STRING],
        (K::ToString, Shape::SumBase) => vec![
            "abstract public function toString(): string;",
            MAGIC_TO_STRING,
        ],
        (K::FromString, Shape::Single | Shape::SumBranch) => vec![FROM_STRING],
        (K::Uuid, Shape::Single) => vec![UUID],
        _ => Vec::new(),
    }
}
