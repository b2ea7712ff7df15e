//! Declaration type definitions.
//!
//! Contains the value types a parsed declaration is made of. Everything
//! here is immutable once a [`Declaration`](super::Declaration) has been
//! built.

use std::fmt;

use declc_foundation::split_qualified;

// =============================================================================
// Builtin Types
// =============================================================================

/// Types the DSL knows without a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    /// `string` / `String`
    String,
    /// `int` / `Int`
    Int,
    /// `float` / `Float`
    Float,
    /// `bool` / `Bool`
    Bool,
    /// `array` (argument types only)
    Array,
}

impl BuiltinType {
    /// Looks up an argument type name (`string`, `int`, ...).
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    /// Looks up a scalar-wrapper constructor tag (`String`, `Int`, ...).
    #[must_use]
    pub fn from_constructor_tag(tag: &str) -> Option<Self> {
        match tag {
            "String" => Some(Self::String),
            "Int" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "Bool" => Some(Self::Bool),
            _ => None,
        }
    }

    /// Returns the argument type name.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Array => "array",
        }
    }

    /// Returns the constructor tag for scalar wrappers.
    #[must_use]
    pub const fn constructor_tag(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Bool => "Bool",
            Self::Array => "Array",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// =============================================================================
// Literals
// =============================================================================

/// A literal value in DSL source (argument defaults, enum values).
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// String literal
    String(String),
    /// `[]`
    EmptyList,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::EmptyList => f.write_str("[]"),
        }
    }
}

// =============================================================================
// Arguments
// =============================================================================

/// One field of a constructor.
///
/// Corresponds to `?Type[] $name = default` syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    /// Field name without the `$`.
    pub name: String,
    /// Builtin type name or fully qualified class name; `None` when untyped.
    pub type_hint: Option<String>,
    /// Whether `null` is accepted.
    pub nullable: bool,
    /// Whether the argument holds a list of `type_hint`.
    pub is_list: bool,
    /// Default value, if any.
    pub default: Option<Literal>,
}

impl Argument {
    /// Creates an untyped, non-nullable argument.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            nullable: false,
            is_list: false,
            default: None,
        }
    }

    /// Sets the type.
    #[must_use]
    pub fn typed(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    /// Marks the argument nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the argument as a list.
    #[must_use]
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: Literal) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns the builtin type, if the argument is typed with one.
    #[must_use]
    pub fn builtin(&self) -> Option<BuiltinType> {
        self.type_hint.as_deref().and_then(BuiltinType::from_type_name)
    }

    /// Returns the class name, if the argument is typed with a class.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        match &self.type_hint {
            Some(t) if BuiltinType::from_type_name(t).is_none() => Some(t),
            _ => None,
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// One variant of a declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Constructor {
    /// Fully qualified name, or the scalar tag for scalar wrappers.
    pub name: String,
    /// Wrapped builtin for scalar-wrapper constructors (`String`, `Int[]`).
    pub scalar: Option<BuiltinType>,
    /// Ordered fields.
    pub arguments: Vec<Argument>,
}

impl Constructor {
    /// Creates a named constructor.
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            scalar: None,
            arguments,
        }
    }

    /// Creates a scalar-wrapper constructor with its synthesized argument.
    #[must_use]
    pub fn scalar(builtin: BuiltinType, is_list: bool) -> Self {
        let mut argument = Argument::new(if is_list { "values" } else { "value" })
            .typed(builtin.type_name());
        argument.is_list = is_list;
        Self {
            name: builtin.constructor_tag().to_string(),
            scalar: Some(builtin),
            arguments: vec![argument],
        }
    }

    /// Returns true for scalar-wrapper constructors.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.scalar.is_some()
    }

    /// Returns the name without its namespace.
    #[must_use]
    pub fn local_name(&self) -> &str {
        split_qualified(&self.name).1
    }

    /// Returns the namespace part of the name.
    #[must_use]
    pub fn namespace(&self) -> &str {
        split_qualified(&self.name).0
    }

    /// Looks up an argument by name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

// =============================================================================
// Conditions
// =============================================================================

/// Constructor key of a condition that applies to every constructor.
pub const ALL_CONSTRUCTORS: &str = "_";

/// A guard attached to a declaration.
///
/// Corresponds to `where [Ctor:] expr => "message"` syntax. The expression
/// describes the failure case.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    /// `_` or a constructor's local name.
    pub constructor: String,
    /// Raw boolean expression fragment.
    pub expression: String,
    /// Error message raised when the expression holds.
    pub message: String,
}

impl Condition {
    /// Creates a condition.
    pub fn new(
        constructor: impl Into<String>,
        expression: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            constructor: constructor.into(),
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Returns true if this condition guards the given constructor.
    #[must_use]
    pub fn applies_to(&self, constructor: &Constructor) -> bool {
        self.constructor == ALL_CONSTRUCTORS
            || self.constructor == constructor.local_name()
            || self.constructor == constructor.name
    }
}

// =============================================================================
// Declaration Kind
// =============================================================================

/// Whether a declaration defines data or a marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `data` declaration
    Data,
    /// `marker` declaration
    Marker,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => f.write_str("data"),
            Self::Marker => f.write_str("marker"),
        }
    }
}
