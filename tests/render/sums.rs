//! Sum types: an abstract base plus one final class per constructor.

use crate::{code, render};

const SHAPE: &str = "namespace App;
    data Shape = Circle { float $radius } | Square { float $side } | Origin
        deriving (Equals)
        where Circle: radius <= 0 => 'Radius must be positive';";

#[test]
fn base_then_branches() {
    let output = render(SHAPE);
    assert_eq!(
        output.identifiers(),
        vec!["App\\Shape", "App\\Circle", "App\\Square", "App\\Origin"]
    );
}

#[test]
fn abstract_base_with_factories() {
    let output = render(SHAPE);
    let base = code(&output, "App\\Shape");

    assert!(base.contains("abstract class Shape\n{"));
    assert!(base.contains(
        "    public static function circle(float $radius): self\n    {\n        return new Circle($radius);\n    }"
    ));
    assert!(base.contains("public static function origin(): self"));
    assert!(base.contains("return new Origin();"));
    assert!(base.contains("    abstract public function equals(?self $other): bool;"));
    assert!(!base.contains("__construct"));
    assert!(!base.contains("private "));
}

#[test]
fn branches_extend_the_base() {
    let output = render(SHAPE);
    let circle = code(&output, "App\\Circle");

    assert!(circle.contains("final class Circle extends Shape\n{"));
    assert!(circle.contains("private float $radius;"));
    assert!(circle.contains("if ($radius <= 0) {"));
    assert!(circle.contains("public function equals(?Shape $other): bool"));
    assert!(circle.contains("return new self($radius);"));

    let square = code(&output, "App\\Square");
    assert!(!square.contains("InvalidArgumentException"));
}

#[test]
fn branches_in_another_namespace() {
    let output = render(
        "namespace App;
         data Result = \\Lib\\Ok { $value } | \\Lib\\Failure { string $reason };",
    );
    let ok = code(&output, "Lib\\Ok");
    assert!(ok.contains("namespace Lib;"));
    assert!(ok.contains("final class Ok extends \\App\\Result"));
    let base = code(&output, "App\\Result");
    assert!(base.contains("return new \\Lib\\Failure($reason);"));
}

#[test]
fn abstract_conversions_on_the_base() {
    let output = render(
        "namespace App;
         data Money = Euro { int $cents } | Dollar { int $cents }
             deriving (ToArray, FromArray);",
    );
    let base = code(&output, "App\\Money");
    assert!(base.contains("abstract public function toArray(): array;"));
    assert!(!base.contains("fromArray"));

    let euro = code(&output, "App\\Euro");
    assert!(euro.contains("public static function fromArray(array $data): self"));
    assert!(euro.contains("'cents' => $this->cents,"));
}
