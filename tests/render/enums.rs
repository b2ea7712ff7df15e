//! Enumerations: a base with name and value maps plus one class per option.

use crate::{code, render};

const COLOR: &str = "namespace App; enum Color = Red | Green | Blue;";

#[test]
fn one_artifact_per_option() {
    let output = render(COLOR);
    assert_eq!(
        output.identifiers(),
        vec!["App\\Color", "App\\Red", "App\\Green", "App\\Blue"]
    );
}

#[test]
fn base_maps_names_and_values() {
    let output = render(COLOR);
    let base = code(&output, "App\\Color");

    assert!(base.contains("abstract class Color\n{"));
    assert!(base.contains(
        "    public const OPTIONS = [\n        'Red' => Red::class,\n        'Green' => Green::class,\n        'Blue' => Blue::class,\n    ];"
    ));
    assert!(base.contains(
        "    public const VALUES = [\n        'Red' => 0,\n        'Green' => 1,\n        'Blue' => 2,\n    ];"
    ));
    assert!(base.contains(
        "    public static function blue(): self\n    {\n        return new Blue();\n    }"
    ));
    assert!(base.contains("public static function fromName(string $name): self"));
    assert!(base.contains("public static function fromValue($value): self"));
    assert!(base.contains("    public function toString(): string\n    {\n        return $this->name();\n    }"));
}

#[test]
fn branches_carry_name_and_value() {
    let output = render(COLOR);
    let green = code(&output, "App\\Green");

    assert!(green.contains("final class Green extends Color\n{"));
    assert!(green.contains("    public const NAME = 'Green';"));
    assert!(green.contains("    public const VALUE = 1;"));
    assert!(!green.contains("__construct"));
    assert!(!green.contains("{{"));
}

#[test]
fn explicit_values() {
    let output = render(
        "namespace App;
         data Size = Small | Large deriving (Enum(useValue)) with (Small: 's', Large: 'l');",
    );
    let base = code(&output, "App\\Size");
    assert!(base.contains("'Small' => 's',"));
    assert!(base.contains("return (string) $this->value();"));

    let large = code(&output, "App\\Large");
    assert!(large.contains("public const VALUE = 'l';"));
}

#[test]
fn numeric_values_keep_their_sign() {
    let output = render("namespace App; enum Suit = Hearts | Spades with (Hearts: 1, Spades: -2);");
    assert!(code(&output, "App\\Spades").contains("public const VALUE = -2;"));
}

#[test]
fn enum_options_colliding_with_a_record_are_duplicates() {
    use declc_foundation::ErrorKind;
    use declc_language::parse;
    use declc_render::Renderer;

    let registry = parse(
        "namespace App;
         enum Color = Red | Green;
         data Red = Red { int $shade };",
    )
    .unwrap();
    let err = Renderer::default().render(&registry).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclaration(ref id) if id == "App\\Red"));
}
