//! Messages carried in a payload array.

use declc_render::{MessageBase, MessageConfig, RenderConfig};

use crate::{code, render, render_with};

const SOURCE: &str = "namespace App;
    data UserId = UserId deriving (Uuid);
    data Email = String deriving (ToScalar, FromScalar);
    data RegisterUser : 'register-user' = RegisterUser { UserId $id, Email $email, string[] $roles = [] }
        deriving (Command, Equals);
    data FindUser = FindUser { UserId $id } deriving (Query);
    data UserRegistered = UserRegistered { UserId $id, Email $email } deriving (AggregateChanged);
    data UserLoggedIn = UserLoggedIn { UserId $id } deriving (DomainEvent);";

#[test]
fn command_extends_the_prooph_base() {
    let output = render(SOURCE);
    let command = code(&output, "App\\RegisterUser");

    assert!(command.contains(
        "final class RegisterUser extends \\Prooph\\Common\\Messaging\\Command implements \\Prooph\\Common\\Messaging\\PayloadConstructable\n{\n    use \\Prooph\\Common\\Messaging\\PayloadTrait;\n\n    protected $messageName = 'register-user';"
    ));
    assert!(!command.contains("__construct"));
    assert!(!command.contains("private "));
}

#[test]
fn command_factory_fills_the_payload() {
    let output = render(SOURCE);
    let command = code(&output, "App\\RegisterUser");

    assert!(command.contains(
        "public static function with(UserId $id, Email $email, array $roles = []): self"
    ));
    assert!(command.contains("'id' => $id->toString(),"));
    assert!(command.contains("'email' => $email->toScalar(),"));
    assert!(command.contains("foreach ($roles as $item) {"));
    assert!(command.contains("return UserId::fromString($this->payload['id']);"));
    assert!(command.contains("return Email::fromScalar($this->payload['email']);"));
    assert!(command.contains("return $this->payload() === $other->payload();"));
}

#[test]
fn messages_without_a_name_keep_the_class_name() {
    let output = render(SOURCE);
    let query = code(&output, "App\\FindUser");

    assert!(query.contains(" extends \\Prooph\\Common\\Messaging\\Query"));
    assert!(!query.contains("$messageName"));

    let event = code(&output, "App\\UserLoggedIn");
    assert!(event.contains(" extends \\Prooph\\Common\\Messaging\\DomainEvent"));
}

#[test]
fn aggregate_changed_occurs_on_its_id() {
    let output = render(SOURCE);
    let event = code(&output, "App\\UserRegistered");

    assert!(event.contains("final class UserRegistered extends \\Prooph\\EventSourcing\\AggregateChanged\n{"));
    assert!(event.contains("return self::occur($id->toString(), ["));
    assert!(event.contains("'email' => $email->toScalar(),"));
    assert!(!event.contains("'id' =>"));
    assert!(event.contains("return UserId::fromString($this->aggregateId());"));
}

#[test]
fn configured_message_bases() {
    let config = RenderConfig::default().with_messages(MessageConfig {
        command: MessageBase::new("App\\Messaging\\Command"),
        ..MessageConfig::default()
    });
    let output = render_with(SOURCE, config);
    let command = code(&output, "App\\RegisterUser");

    assert!(command.contains("final class RegisterUser extends \\App\\Messaging\\Command\n{"));
    assert!(!command.contains("PayloadTrait"));
}
