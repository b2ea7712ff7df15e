//! The declaration model.
//!
//! A [`Declaration`] is one DSL-level type definition. It is created through
//! [`DeclarationBuilder`], which checks every structural invariant and every
//! requested [`Deriving`] before handing out an immutable value.
//!
//! The flow is: Source → Parser → `DeclarationBuilder` → Declaration → Registry
//!
//! # Module Structure
//!
//! - `types` - Arguments, constructors, conditions and literals
//! - `deriving` - Derivings and their structural rules
//! - `builder` - The validating `DeclarationBuilder`

mod builder;
mod deriving;
mod types;


pub use builder::DeclarationBuilder;
pub use deriving::{
    Deriving, DerivingKind, EnumOptions, ExceptionConstructor, ExceptionOptions,
    template_references,
};
pub use types::{
    ALL_CONSTRUCTORS, Argument, BuiltinType, Condition, Constructor, DeclarationKind, Literal,
};

/// One validated type definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    kind: DeclarationKind,
    namespace: String,
    name: String,
    qualified_name: String,
    constructors: Vec<Constructor>,
    derivings: Vec<Deriving>,
    conditions: Vec<Condition>,
    message_name: Option<String>,
    parent_marker: Option<String>,
    line: u32,
}

impl Declaration {
    /// Returns whether this is a data or marker declaration.
    #[must_use]
    pub const fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Returns the namespace; empty for the root namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace-qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the constructors in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// Returns the derivings in declaration order.
    #[must_use]
    pub fn derivings(&self) -> &[Deriving] {
        &self.derivings
    }

    /// Returns the guard conditions in declaration order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the message name override.
    #[must_use]
    pub fn message_name(&self) -> Option<&str> {
        self.message_name.as_deref()
    }

    /// Returns the qualified name of the parent marker.
    #[must_use]
    pub fn parent_marker(&self) -> Option<&str> {
        self.parent_marker.as_deref()
    }

    /// Returns the source line the declaration starts on; 0 when built by hand.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns true for marker declarations.
    #[must_use]
    pub fn is_marker(&self) -> bool {
        self.kind == DeclarationKind::Marker
    }

    /// Returns the deriving of the given kind, if requested.
    #[must_use]
    pub fn deriving(&self, kind: DerivingKind) -> Option<&Deriving> {
        self.derivings.iter().find(|d| d.kind() == kind)
    }

    /// Returns true if the deriving of the given kind is requested.
    #[must_use]
    pub fn has_deriving(&self, kind: DerivingKind) -> bool {
        self.deriving(kind).is_some()
    }

    /// Returns the enum options when the declaration derives `Enum`.
    #[must_use]
    pub fn enum_options(&self) -> Option<&EnumOptions> {
        self.derivings.iter().find_map(|d| match d {
            Deriving::Enum(options) => Some(options),
            _ => None,
        })
    }

    /// Returns the exception options when the declaration derives `Exception`.
    #[must_use]
    pub fn exception_options(&self) -> Option<&ExceptionOptions> {
        self.derivings.iter().find_map(|d| match d {
            Deriving::Exception(options) => Some(options),
            _ => None,
        })
    }

    /// Returns the message role deriving, if any.
    #[must_use]
    pub fn message_role(&self) -> Option<DerivingKind> {
        self.derivings
            .iter()
            .map(Deriving::kind)
            .find(|k| k.is_message())
    }

    /// Returns true if the declaration derives `Enum`.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.has_deriving(DerivingKind::Enum)
    }

    /// Returns true if the declaration renders as one class.
    ///
    /// That is the case for a lone scalar wrapper and for a lone constructor
    /// named like the declaration itself.
    #[must_use]
    pub fn is_single_class(&self) -> bool {
        match self.constructors.as_slice() {
            [ctor] => ctor.is_scalar() || ctor.name == self.qualified_name,
            _ => false,
        }
    }

    /// Looks up a constructor by local or qualified name.
    #[must_use]
    pub fn constructor(&self, name: &str) -> Option<&Constructor> {
        self.constructors
            .iter()
            .find(|c| c.name == name || c.local_name() == name)
    }

    /// Returns the position of a constructor in declaration order.
    #[must_use]
    pub fn constructor_index(&self, constructor: &Constructor) -> Option<usize> {
        self.constructors.iter().position(|c| c.name == constructor.name)
    }

    /// Returns the conditions guarding the given constructor.
    pub fn conditions_for<'a>(
        &'a self,
        constructor: &'a Constructor,
    ) -> impl Iterator<Item = &'a Condition> + 'a {
        self.conditions.iter().filter(|c| c.applies_to(constructor))
    }
}
