//! Configuration for the rendering engine.

use std::collections::BTreeMap;

use declc_language::DerivingKind;

use crate::resolve::PlainType;

/// Default comment emitted at the top of every artifact.
pub const DEFAULT_HEADER: &str = "// This file was generated by declc. Do not edit it by hand.";

/// Default upper bound on substitution passes per artifact.
pub const DEFAULT_MAX_PASSES: usize = 16;

// =============================================================================
// Type Converters
// =============================================================================

/// Conversion templates for a class the registry does not own.
///
/// Templates use `{value}` for the converted expression and `{other}` for
/// the right-hand side of an equality check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeConverter {
    /// Expression turning `{value}` into its plain form.
    pub to_plain: String,
    /// Expression building an instance from the plain `{value}`.
    pub from_plain: String,
    /// Boolean expression comparing `{value}` with `{other}`.
    pub equals: String,
    /// Plain form produced by `to_plain` and accepted by `from_plain`.
    pub plain_type: PlainType,
}

impl TypeConverter {
    /// Creates a converter with loose (`==`) equality and an unchecked plain type.
    pub fn new(to_plain: impl Into<String>, from_plain: impl Into<String>) -> Self {
        Self {
            to_plain: to_plain.into(),
            from_plain: from_plain.into(),
            equals: "{value} == {other}".to_string(),
            plain_type: PlainType::Mixed,
        }
    }

    /// Builder method to set the equality template.
    #[must_use]
    pub fn with_equals(mut self, equals: impl Into<String>) -> Self {
        self.equals = equals.into();
        self
    }

    /// Builder method to set the plain type.
    #[must_use]
    pub fn with_plain_type(mut self, plain_type: PlainType) -> Self {
        self.plain_type = plain_type;
        self
    }

    /// Fills the `to_plain` template.
    #[must_use]
    pub fn apply_to_plain(&self, value: &str) -> String {
        self.to_plain.replace("{value}", value)
    }

    /// Fills the `from_plain` template.
    #[must_use]
    pub fn apply_from_plain(&self, value: &str) -> String {
        self.from_plain.replace("{value}", value)
    }

    /// Fills the `equals` template.
    #[must_use]
    pub fn apply_equals(&self, value: &str, other: &str) -> String {
        self.equals
            .replace("{value}", value)
            .replace("{other}", other)
    }
}

// =============================================================================
// Uuid
// =============================================================================

/// Classes used by `Uuid` declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UuidConfig {
    /// Class with static `uuid4()` and `fromString()` factories.
    pub factory: String,
    /// Interface of the wrapped UUID value.
    pub interface: String,
}

impl Default for UuidConfig {
    fn default() -> Self {
        Self {
            factory: "Ramsey\\Uuid\\Uuid".to_string(),
            interface: "Ramsey\\Uuid\\UuidInterface".to_string(),
        }
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Base class, interfaces and traits of one message role.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MessageBase {
    /// Qualified base class.
    pub class: String,
    /// Qualified interfaces to implement.
    pub implements: Vec<String>,
    /// Qualified traits to use.
    pub traits: Vec<String>,
}

impl MessageBase {
    /// Creates a base without interfaces or traits.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            implements: Vec::new(),
            traits: Vec::new(),
        }
    }

    /// Builder method to add an interface.
    #[must_use]
    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Builder method to add a trait.
    #[must_use]
    pub fn using(mut self, trait_name: impl Into<String>) -> Self {
        self.traits.push(trait_name.into());
        self
    }

    fn payload_constructable(class: &str) -> Self {
        Self::new(class)
            .implementing("Prooph\\Common\\Messaging\\PayloadConstructable")
            .using("Prooph\\Common\\Messaging\\PayloadTrait")
    }
}

/// Message base classes per role.
///
/// Defaults follow the prooph message conventions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageConfig {
    /// Base of `Command` declarations.
    pub command: MessageBase,
    /// Base of `Query` declarations.
    pub query: MessageBase,
    /// Base of `DomainEvent` declarations.
    pub domain_event: MessageBase,
    /// Base of `AggregateChanged` declarations.
    pub aggregate_changed: MessageBase,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            command: MessageBase::payload_constructable("Prooph\\Common\\Messaging\\Command"),
            query: MessageBase::payload_constructable("Prooph\\Common\\Messaging\\Query"),
            domain_event: MessageBase::payload_constructable(
                "Prooph\\Common\\Messaging\\DomainEvent",
            ),
            aggregate_changed: MessageBase::new("Prooph\\EventSourcing\\AggregateChanged"),
        }
    }
}

impl MessageConfig {
    /// Returns the base for a message role; `None` for other derivings.
    #[must_use]
    pub fn base_for(&self, role: DerivingKind) -> Option<&MessageBase> {
        match role {
            DerivingKind::Command => Some(&self.command),
            DerivingKind::Query => Some(&self.query),
            DerivingKind::DomainEvent => Some(&self.domain_event),
            DerivingKind::AggregateChanged => Some(&self.aggregate_changed),
            _ => None,
        }
    }
}

// =============================================================================
// RenderConfig
// =============================================================================

/// Configuration for the rendering engine.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Comment line emitted at the top of every artifact; empty for none.
    pub header: String,

    /// Whether `declare(strict_types=1);` is emitted.
    pub strict_types: bool,

    /// Classes used by `Uuid` declarations.
    pub uuid: UuidConfig,

    /// Base classes of message roles.
    pub messages: MessageConfig,

    /// Converters for classes outside the registry, keyed by qualified name.
    pub converters: BTreeMap<String, TypeConverter>,

    /// Upper bound on substitution passes per artifact.
    pub max_passes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            strict_types: true,
            uuid: UuidConfig::default(),
            messages: MessageConfig::default(),
            converters: BTreeMap::new(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl RenderConfig {
    /// Builder method to set the header comment.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Builder method to enable/disable `declare(strict_types=1);`.
    #[must_use]
    pub fn with_strict_types(mut self, strict_types: bool) -> Self {
        self.strict_types = strict_types;
        self
    }

    /// Builder method to set the UUID classes.
    #[must_use]
    pub fn with_uuid(mut self, uuid: UuidConfig) -> Self {
        self.uuid = uuid;
        self
    }

    /// Builder method to set the message bases.
    #[must_use]
    pub fn with_messages(mut self, messages: MessageConfig) -> Self {
        self.messages = messages;
        self
    }

    /// Builder method to register a converter for a class.
    #[must_use]
    pub fn with_converter(mut self, class: impl Into<String>, converter: TypeConverter) -> Self {
        let class = class.into();
        self.converters
            .insert(class.trim_start_matches('\\').to_string(), converter);
        self
    }

    /// Builder method to set the pass limit.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Returns the converter registered for a qualified class name.
    #[must_use]
    pub fn converter(&self, class: &str) -> Option<&TypeConverter> {
        self.converters.get(class.trim_start_matches('\\'))
    }

    /// Adds the converter for `\DateTimeImmutable` (ATOM strings).
    #[must_use]
    pub fn with_date_time_converter(self) -> Self {
        self.with_converter(
            "DateTimeImmutable",
            TypeConverter::new(
                "{value}->format(\\DATE_ATOM)",
                "new \\DateTimeImmutable({value})",
            )
            .with_plain_type(PlainType::String),
        )
    }
}
