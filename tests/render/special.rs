//! Identifiers, exceptions and markers.

use declc_render::{RenderConfig, UuidConfig};

use crate::{code, render, render_with};

#[test]
fn uuid_identifier() {
    let output = render("namespace App; data UserId = UserId deriving (Uuid);");
    let id = code(&output, "App\\UserId");

    assert!(id.contains("final class UserId\n{\n    private \\Ramsey\\Uuid\\UuidInterface $uuid;"));
    assert!(id.contains("    private function __construct(\\Ramsey\\Uuid\\UuidInterface $uuid)\n    {\n        $this->uuid = $uuid;\n    }"));
    assert!(id.contains("return new self(\\Ramsey\\Uuid\\Uuid::uuid4());"));
    assert!(id.contains("return new self(\\Ramsey\\Uuid\\Uuid::fromString($uuid));"));
    assert!(id.contains("public function __toString(): string"));
    assert!(id.contains("return null !== $other && $this->uuid->equals($other->uuid);"));
}

#[test]
fn uuid_library_is_configurable() {
    let config = RenderConfig::default().with_uuid(UuidConfig {
        factory: "Lib\\Uuid".to_string(),
        interface: "Lib\\UuidValue".to_string(),
    });
    let output = render_with("namespace App; data OrderId = OrderId deriving (Uuid);", config);
    let id = code(&output, "App\\OrderId");

    assert!(id.contains("private \\Lib\\UuidValue $uuid;"));
    assert!(id.contains("return new self(\\Lib\\Uuid::uuid4());"));
    assert!(!id.contains("Ramsey"));
}

#[test]
fn exception_with_named_factory() {
    let output = render(
        r#"namespace App;
        data UserNotFound = UserNotFound { string $email }
            deriving (Exception(withEmail: "No user with email {{email}}"): "User not found");"#,
    );
    let exception = code(&output, "App\\UserNotFound");

    assert!(exception.contains("final class UserNotFound extends \\Exception\n{"));
    assert!(exception.contains(
        "public function __construct(string $email, string $message = 'User not found', int $code = 0, ?\\Throwable $previous = null)"
    ));
    assert!(exception.contains("parent::__construct($message, $code, $previous);"));
    assert!(exception.contains(
        "return new self($email, \\sprintf('No user with email %s', $email));"
    ));
    assert!(exception.contains("public function email(): string"));
    assert!(!exception.contains("public function withEmail"));
}

#[test]
fn exception_parent_in_the_same_namespace() {
    let output = render(
        "namespace App;
         data Failure = Failure deriving (Exception(DomainError));",
    );
    assert!(code(&output, "App\\Failure").contains("final class Failure extends DomainError\n{"));
}

#[test]
fn marker_interfaces() {
    let output = render("namespace App; marker Event; marker UserEvent : Event;");
    assert_eq!(
        code(&output, "App\\Event"),
        "<?php\n\n// This file was generated by declc. Do not edit it by hand.\n\ndeclare(strict_types=1);\n\nnamespace App;\n\ninterface Event\n{\n}\n"
    );
    assert!(code(&output, "App\\UserEvent").contains("interface UserEvent extends Event\n{\n}"));
}
