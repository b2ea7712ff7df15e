//! Single-class records.

use declc_foundation::ErrorKind;
use declc_language::parse;
use declc_render::{RenderConfig, Renderer};

use crate::{code, render, render_with};

const POINT: &str = "<?php

// This file was generated by declc. Do not edit it by hand.

declare(strict_types=1);

namespace App;

final class Point
{
    private int $x;
    private int $y;

    public function __construct(int $x, int $y)
    {
        $this->x = $x;
        $this->y = $y;
    }

    public function x(): int
    {
        return $this->x;
    }

    public function y(): int
    {
        return $this->y;
    }

    public function withX(int $x): self
    {
        return new self($x, $this->y);
    }

    public function withY(int $y): self
    {
        return new self($this->x, $y);
    }

    public function equals(?self $other): bool
    {
        if (! $other instanceof self) {
            return false;
        }

        if ($this->x !== $other->x) {
            return false;
        }

        if ($this->y !== $other->y) {
            return false;
        }

        return true;
    }

    public function toArray(): array
    {
        return [
            'x' => $this->x,
            'y' => $this->y,
        ];
    }
}
";

// =============================================================================
// Complete Output
// =============================================================================

#[test]
fn point_record() {
    let output = render("namespace App; data Point = Point { int $x, int $y } deriving (Equals, ToArray);");
    assert_eq!(output.len(), 1);
    assert_eq!(code(&output, "App\\Point"), POINT);
}

#[test]
fn without_strict_types_or_header() {
    let output = render_with(
        "data Flag = Flag { bool $on };",
        RenderConfig::default().with_strict_types(false).with_header(""),
    );
    let code = code(&output, "Flag");
    assert!(code.starts_with("<?php\n\nfinal class Flag\n{\n    private bool $on;"));
    assert!(!code.contains("namespace"));
}

// =============================================================================
// Conditions and Validation
// =============================================================================

#[test]
fn conditions_guard_the_constructor() {
    let output = render(
        "namespace App;
         data Person = Person { string $name, int $age }
             where age < 18 => 'Too young'
                 | strlen(name) === 0 => 'Name required';",
    );
    let code = code(&output, "App\\Person");
    let guard = code
        .find("        if ($age < 18) {\n            throw new \\InvalidArgumentException('Too young');\n        }")
        .unwrap();
    let second = code.find("if (strlen($name) === 0) {").unwrap();
    let assignment = code.find("$this->name = $name;").unwrap();
    assert!(guard < second && second < assignment);
}

#[test]
fn condition_text_is_emitted_verbatim() {
    let output = render(
        "namespace App;
         data Tagged = Tagged { int $age, string $tag }
             where age < 0 => 'bad {{class_name}}'
                 | tag === '{{foo}}' => 'first line\\nsecond line';",
    );
    let code = code(&output, "App\\Tagged");

    assert!(code.contains("throw new \\InvalidArgumentException(\"bad \\x7B{class_name}}\");"));
    assert!(code.contains("if ($tag === '{' . '{foo}}') {"));
    assert!(code.contains(
        "            throw new \\InvalidArgumentException(\"first line\\nsecond line\");\n        }"
    ));
    assert!(!code.contains("'bad Tagged'"));
}

#[test]
fn typed_lists_check_their_elements() {
    let output = render(
        "namespace App;
         data Email = String;
         data Contact = Contact { Email[] $emails, float[] $weights };",
    );
    let code = code(&output, "App\\Contact");
    assert!(code.contains("foreach ($emails as $item) {"));
    assert!(code.contains("if (! $item instanceof Email) {"));
    assert!(code.contains("Expected $emails to contain only App\\\\Email"));
    assert!(code.contains("if (! (\\is_float($item) || \\is_int($item))) {"));
    assert!(code.contains("$this->weights = \\array_map(static fn ($value) => (float) $value, $weights);"));
}

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn from_array_validates_keys() {
    let output = render(
        "namespace App;
         data Person = Person { string $name, ?int $age = null } deriving (FromArray);",
    );
    let code = code(&output, "App\\Person");
    assert!(code.contains("public static function fromArray(array $data): self"));
    assert!(code.contains(
        "if (! isset($data['name']) || ! \\is_string($data['name'])) {\n            throw new \\InvalidArgumentException('Key \"name\" is missing in data array or is not a string');"
    ));
    assert!(code.contains("$age = null;\n\n        if (isset($data['age'])) {"));
    assert!(code.contains("return new self($name, $age);"));
}

#[test]
fn nested_declarations_convert_through_their_derivings() {
    let output = render(
        "namespace App;
         data Email = String deriving (ToScalar, FromScalar);
         data Color = Red | Green deriving (Enum);
         data Profile = Profile { Email $email, ?Color $color, Email[] $aliases }
             deriving (ToArray, FromArray);",
    );
    let code = code(&output, "App\\Profile");
    assert!(code.contains("'email' => $this->email->toScalar(),"));
    assert!(code.contains("'color' => null === $this->color ? null : $this->color->name(),"));
    assert!(code.contains("'aliases' => \\array_map(static fn ($value) => $value->toScalar(), $this->aliases),"));
    assert!(code.contains("$email = Email::fromScalar($data['email']);"));
    assert!(code.contains("Color::fromName("));
}

#[test]
fn scalar_wrapper_conversions() {
    let output = render(
        "namespace App; data Age = Int deriving (ToScalar, FromScalar, Equals);",
    );
    let code = code(&output, "App\\Age");
    assert!(code.contains("private int $value;"));
    assert!(code.contains("public function toScalar(): int\n    {\n        return $this->value;\n    }"));
    assert!(code.contains("public static function fromScalar(int $value): self\n    {\n        return new self($value);\n    }"));
}

#[test]
fn string_wrapper_gets_magic_to_string() {
    let output = render("namespace App; data Name = String deriving (ToString, FromString);");
    let code = code(&output, "App\\Name");
    assert!(code.contains("public function toString(): string\n    {\n        return $this->value;\n    }"));
    assert!(code.contains("public function __toString(): string"));
    assert!(code.contains("public static function fromString(string $value): self"));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn unknown_field_type_fails_only_when_converted() {
    let source = "namespace App; data Event = Event { \\Some\\Clock $clock };";
    assert!(Renderer::default().render(&parse(source).unwrap()).is_ok());

    let source = "namespace App; data Event = Event { \\Some\\Clock $clock } deriving (ToArray);";
    let err = Renderer::default().render(&parse(source).unwrap()).unwrap_err();
    match err.kind {
        ErrorKind::UnresolvedType { type_name, declaration } => {
            assert_eq!(type_name, "Some\\Clock");
            assert_eq!(declaration, "App\\Event");
        }
        other => panic!("expected UnresolvedType, got {other:?}"),
    }
}

#[test]
fn field_without_conversion_is_unsupported() {
    let source = "namespace App;
        data Opaque = Opaque { int $x };
        data Holder = Holder { Opaque $opaque } deriving (ToArray);";
    let err = Renderer::default().render(&parse(source).unwrap()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsupportedConversion { .. }));
}
