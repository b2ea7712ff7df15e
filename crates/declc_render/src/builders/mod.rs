//! Placeholder builders.
//!
//! A builder produces the text for one placeholder key of one artifact.
//! Builders for a key form a chain: the first builder returning something
//! other than the fallback (the placeholder itself) wins. Specialized
//! builders (messages, UUIDs, exceptions, enums) sit in front of the
//! generic ones, so a custom builder prepended by a caller overrides both.

use std::collections::BTreeMap;
use std::fmt;

use declc_foundation::Result;
use declc_language::{Constructor, Declaration};

use crate::context::RenderContext;
use crate::shape::Shape;

mod construction;
mod conversion;
mod enumeration;
mod equality;
mod exception;
mod message;
mod structure;
mod uuid;

/// A builder function.
///
/// Receives the artifact's declaration and, for single classes and
/// branches, its constructor. Returns `fallback` unchanged when it does not
/// apply.
pub type Builder =
    fn(&RenderContext<'_>, &Declaration, Option<&Constructor>, &str) -> Result<String>;

/// Returns the placeholder text for a key.
#[must_use]
pub fn placeholder(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

// =============================================================================
// BuilderRegistry
// =============================================================================

/// Ordered builder chains per placeholder key.
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    chains: BTreeMap<String, Vec<Builder>>,
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.chains.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

impl BuilderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the registry with every standard builder.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("header", structure::header);
        registry.register("strict_types", structure::strict_types);
        registry.register("namespace", structure::namespace);
        registry.register("class_keyword", structure::class_keyword);
        registry.register("class_name", structure::class_name);
        registry.register("marker_extends", structure::marker_extends);

        registry.register("class_extends", message::class_extends);
        registry.register("class_extends", exception::class_extends);
        registry.register("class_extends", structure::class_extends);

        registry.register("traits", message::traits);
        registry.register("traits", structure::traits);

        registry.register("constants", message::constants);
        registry.register("constants", structure::constants);

        registry.register("properties", message::properties);
        registry.register("properties", uuid::properties);
        registry.register("properties", structure::properties);

        registry.register("constructor", message::constructor);
        registry.register("constructor", uuid::constructor);
        registry.register("constructor", exception::constructor);
        registry.register("constructor", construction::constructor);

        registry.register("factories", message::factories);
        registry.register("factories", uuid::factories);
        registry.register("factories", exception::factories);
        registry.register("factories", construction::factories);

        registry.register("accessors", message::accessors);
        registry.register("accessors", exception::accessors);
        registry.register("accessors", structure::accessors);

        registry.register("equals_type", equality::equals_type);
        registry.register("equals_body", message::equals_body);
        registry.register("equals_body", equality::equals_body);

        registry.register("to_array_body", conversion::to_array_body);
        registry.register("from_array_body", conversion::from_array_body);
        registry.register("to_scalar_return", conversion::to_scalar_return);
        registry.register("to_scalar_body", conversion::to_scalar_body);
        registry.register("from_scalar_param", conversion::from_scalar_param);
        registry.register("from_scalar_body", conversion::from_scalar_body);
        registry.register("to_string_body", conversion::to_string_body);
        registry.register("from_string_param", conversion::from_string_param);
        registry.register("from_string_body", conversion::from_string_body);

        registry.register("uuid_methods", uuid::methods);

        registry.register("enum_options", enumeration::options);
        registry.register("enum_values", enumeration::values);
        registry.register("enum_factories", enumeration::factories);
        registry.register("enum_to_string_body", enumeration::to_string_body);
        registry.register("enum_name", enumeration::name);
        registry.register("enum_value", enumeration::value);

        registry
    }

    /// Appends a builder to the end of a key's chain.
    pub fn register(&mut self, key: impl Into<String>, builder: Builder) {
        self.chains.entry(key.into()).or_default().push(builder);
    }

    /// Puts a builder in front of a key's chain.
    pub fn prepend(&mut self, key: impl Into<String>, builder: Builder) {
        self.chains.entry(key.into()).or_default().insert(0, builder);
    }

    /// Returns the chain for a key.
    #[must_use]
    pub fn chain(&self, key: &str) -> &[Builder] {
        self.chains.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns the keys with at least one builder.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    /// Runs the chain for `key`.
    ///
    /// Returns `None` when no builder applies.
    ///
    /// # Errors
    /// Propagates the first builder error.
    pub fn apply(
        &self,
        ctx: &RenderContext<'_>,
        key: &str,
        declaration: &Declaration,
        constructor: Option<&Constructor>,
    ) -> Result<Option<String>> {
        let fallback = placeholder(key);
        for builder in self.chain(key) {
            let value = builder(ctx, declaration, constructor, &fallback)?;
            if value != fallback {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Returns the constructor whose fields live on this artifact.
fn field_owner<'a>(
    declaration: &Declaration,
    constructor: Option<&'a Constructor>,
) -> Option<&'a Constructor> {
    constructor.filter(|_| Shape::of(declaration, constructor).has_fields())
}

/// Returns how generated code reads field `name` of `$this` or another instance.
fn field_ref(declaration: &Declaration, instance: &str, name: &str) -> String {
    if declaration.message_role().is_some() {
        format!("{instance}->{name}()")
    } else {
        format!("{instance}->{name}")
    }
}

/// Returns an expression creating an instance of the artifact from `args`.
fn construct(declaration: &Declaration, args: &str) -> String {
    if declaration.message_role().is_some() {
        format!("self::with({args})")
    } else {
        format!("new self({args})")
    }
}
