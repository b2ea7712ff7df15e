//! Type resolution and value conversion.
//!
//! Builders ask this module how a field's value turns into a plain PHP
//! value (for `toArray`, `toScalar`, message payloads), how a plain value
//! turns back into the field's type, and how two values of the type are
//! compared.

use declc_foundation::{Error, Result};
use declc_language::{Argument, BuiltinType, Declaration, DerivingKind, Literal};

use crate::config::TypeConverter;
use crate::context::RenderContext;
use crate::php::{class_ref, is_nullable};
use crate::shape::renders_single;

// =============================================================================
// Plain Types
// =============================================================================

/// The PHP value category a plain (serialized) value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlainType {
    /// `string`
    String,
    /// `int`
    Int,
    /// `float`, accepting ints
    Float,
    /// `bool`
    Bool,
    /// `array`
    Array,
    /// Anything; never checked
    Mixed,
}

impl PlainType {
    /// Returns the plain type of a builtin.
    #[must_use]
    pub const fn of_builtin(builtin: BuiltinType) -> Self {
        match builtin {
            BuiltinType::String => Self::String,
            BuiltinType::Int => Self::Int,
            BuiltinType::Float => Self::Float,
            BuiltinType::Bool => Self::Bool,
            BuiltinType::Array => Self::Array,
        }
    }

    /// Returns the plain type of a literal.
    #[must_use]
    pub const fn of_literal(literal: &Literal) -> Self {
        match literal {
            Literal::String(_) => Self::String,
            Literal::Int(_) => Self::Int,
            Literal::Float(_) => Self::Float,
            Literal::Bool(_) => Self::Bool,
            Literal::EmptyList => Self::Array,
            Literal::Null => Self::Mixed,
        }
    }

    /// Returns the PHP type declaration, `None` for `Mixed`.
    #[must_use]
    pub const fn type_declaration(self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Int => Some("int"),
            Self::Float => Some("float"),
            Self::Bool => Some("bool"),
            Self::Array => Some("array"),
            Self::Mixed => None,
        }
    }

    /// Returns an expression that holds when `value` is of this type.
    ///
    /// `None` for `Mixed`, which accepts everything.
    #[must_use]
    pub fn check(self, value: &str) -> Option<String> {
        match self {
            Self::String => Some(format!("\\is_string({value})")),
            Self::Int => Some(format!("\\is_int({value})")),
            Self::Float => Some(format!("(\\is_float({value}) || \\is_int({value}))")),
            Self::Bool => Some(format!("\\is_bool({value})")),
            Self::Array => Some(format!("\\is_array({value})")),
            Self::Mixed => None,
        }
    }

    /// Returns a human readable description used in error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Int => "an int",
            Self::Float => "a float",
            Self::Bool => "a bool",
            Self::Array => "an array",
            Self::Mixed => "a value",
        }
    }

    /// Applies the coercion a checked plain value still needs.
    #[must_use]
    pub fn coerce(self, value: &str) -> String {
        match self {
            Self::Float => format!("(float) {value}"),
            _ => value.to_string(),
        }
    }

    /// Returns the common type of all `types`, `Mixed` when they differ.
    pub fn common(types: impl IntoIterator<Item = Self>) -> Self {
        let mut types = types.into_iter();
        let Some(first) = types.next() else {
            return Self::Mixed;
        };
        types.fold(first, |acc, t| match (acc, t) {
            (a, b) if a == b => a,
            (Self::Float, Self::Int) | (Self::Int, Self::Float) => Self::Float,
            _ => Self::Mixed,
        })
    }
}

// =============================================================================
// Resolved Types
// =============================================================================

/// What an argument's type hint refers to.
#[derive(Clone, Copy, Debug)]
pub enum ResolvedType<'a> {
    /// No type hint.
    Untyped,
    /// A builtin type.
    Builtin(BuiltinType),
    /// A declaration of the registry, referenced as `class`.
    Declared {
        /// The owning declaration.
        declaration: &'a Declaration,
        /// The referenced class: the declaration itself or one of its constructors.
        class: &'a str,
    },
    /// A class with a configured converter.
    External {
        /// Qualified class name.
        class: &'a str,
        /// Its conversion templates.
        converter: &'a TypeConverter,
    },
    /// A class neither declared nor configured.
    Unknown {
        /// Qualified class name.
        class: &'a str,
    },
}

/// Resolves the type hint of an argument.
#[must_use]
pub fn resolve<'a>(ctx: &RenderContext<'a>, argument: &'a Argument) -> ResolvedType<'a> {
    if let Some(builtin) = argument.builtin() {
        return ResolvedType::Builtin(builtin);
    }
    let Some(class) = argument.class_name() else {
        return ResolvedType::Untyped;
    };
    let class = class.trim_start_matches('\\');
    if let Some(declaration) = ctx.registry.resolve_type(class) {
        ResolvedType::Declared { declaration, class }
    } else if let Some(converter) = ctx.config.converter(class) {
        ResolvedType::External { class, converter }
    } else {
        ResolvedType::Unknown { class }
    }
}

impl ResolvedType<'_> {
    /// Returns true for builtin and untyped values.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Untyped | Self::Builtin(_))
    }

    /// Returns true if values of this type are compared with `->equals()`.
    #[must_use]
    pub fn uses_equals_method(&self) -> bool {
        match self {
            Self::Declared { declaration, .. } => {
                declaration.has_deriving(DerivingKind::Equals)
                    || declaration.is_enum()
                    || declaration.has_deriving(DerivingKind::Uuid)
            }
            _ => false,
        }
    }

    /// Converts `value` into its plain form.
    ///
    /// # Errors
    /// `UnsupportedConversion` when a declared type derives nothing usable,
    /// `UnresolvedType` for unknown classes.
    pub fn to_plain(&self, value: &str, owner: &str) -> Result<(String, PlainType)> {
        match *self {
            Self::Untyped => Ok((value.to_string(), PlainType::Mixed)),
            Self::Builtin(builtin) => Ok((value.to_string(), PlainType::of_builtin(builtin))),
            Self::External { converter, .. } => {
                Ok((converter.apply_to_plain(value), converter.plain_type))
            }
            Self::Unknown { class } => Err(Error::unresolved_type(class, owner)),
            Self::Declared { declaration, class } => {
                if let Some(options) = declaration.enum_options() {
                    return Ok(if options.use_value {
                        (format!("{value}->value()"), enum_value_type(declaration))
                    } else {
                        (format!("{value}->name()"), PlainType::String)
                    });
                }
                let method = [
                    (DerivingKind::Uuid, "toString", PlainType::String),
                    (DerivingKind::ToArray, "toArray", PlainType::Array),
                    (DerivingKind::ToScalar, "toScalar", scalar_type(declaration)),
                    (DerivingKind::ToString, "toString", PlainType::String),
                ]
                .into_iter()
                .find(|(kind, _, _)| declaration.has_deriving(*kind));
                match method {
                    Some((_, method, plain)) => Ok((format!("{value}->{method}()"), plain)),
                    None => Err(Error::unsupported_conversion(
                        class,
                        "conversion to a plain value",
                        owner,
                    )),
                }
            }
        }
    }

    /// Builds a value of this type from the plain `value`.
    ///
    /// The returned plain type is what `value` must be checked against.
    ///
    /// # Errors
    /// `UnsupportedConversion` when a declared type derives no factory or
    /// names an abstract sum base, `UnresolvedType` for unknown classes.
    pub fn from_plain(&self, value: &str, namespace: &str, owner: &str) -> Result<(String, PlainType)> {
        match *self {
            Self::Untyped => Ok((value.to_string(), PlainType::Mixed)),
            Self::Builtin(builtin) => {
                let plain = PlainType::of_builtin(builtin);
                Ok((plain.coerce(value), plain))
            }
            Self::External { converter, .. } => {
                Ok((converter.apply_from_plain(value), converter.plain_type))
            }
            Self::Unknown { class } => Err(Error::unresolved_type(class, owner)),
            Self::Declared { declaration, class } => {
                let class = if renders_single(declaration) {
                    declaration.qualified_name()
                } else {
                    class
                };
                let target = class_ref(class, namespace);
                if let Some(options) = declaration.enum_options() {
                    return Ok(if options.use_value {
                        (format!("{target}::fromValue({value})"), enum_value_type(declaration))
                    } else {
                        (format!("{target}::fromName({value})"), PlainType::String)
                    });
                }
                if class == declaration.qualified_name() && !renders_single(declaration) {
                    return Err(Error::unsupported_conversion(
                        class,
                        "construction of an abstract sum type",
                        owner,
                    ));
                }
                let method = [
                    (DerivingKind::Uuid, "fromString", PlainType::String),
                    (DerivingKind::FromArray, "fromArray", PlainType::Array),
                    (DerivingKind::FromScalar, "fromScalar", scalar_type(declaration)),
                    (DerivingKind::FromString, "fromString", PlainType::String),
                ]
                .into_iter()
                .find(|(kind, _, _)| declaration.has_deriving(*kind));
                match method {
                    Some((_, method, plain)) => {
                        Ok((format!("{target}::{method}({value})"), plain))
                    }
                    None => Err(Error::unsupported_conversion(
                        class,
                        "construction from a plain value",
                        owner,
                    )),
                }
            }
        }
    }

    /// Returns a boolean expression comparing `value` with `other`.
    ///
    /// # Errors
    /// `UnresolvedType` for unknown classes.
    pub fn equals(&self, value: &str, other: &str, owner: &str) -> Result<String> {
        match *self {
            Self::Untyped | Self::Builtin(_) => Ok(format!("{value} === {other}")),
            Self::External { converter, .. } => Ok(converter.apply_equals(value, other)),
            Self::Unknown { class } => Err(Error::unresolved_type(class, owner)),
            Self::Declared { declaration, .. } => {
                if self.uses_equals_method() {
                    return Ok(format!("{value}->equals({other})"));
                }
                let method = [
                    (DerivingKind::ToArray, "toArray"),
                    (DerivingKind::ToString, "toString"),
                    (DerivingKind::ToScalar, "toScalar"),
                ]
                .into_iter()
                .find(|(kind, _)| declaration.has_deriving(*kind));
                Ok(match method {
                    Some((_, method)) => format!("{value}->{method}() === {other}->{method}()"),
                    None => format!("{value} === {other}"),
                })
            }
        }
    }
}

/// Returns the plain type of the values of an enum.
fn enum_value_type(declaration: &Declaration) -> PlainType {
    let Some(options) = declaration.enum_options() else {
        return PlainType::Mixed;
    };
    PlainType::common(
        declaration
            .constructors()
            .iter()
            .enumerate()
            .map(|(i, ctor)| PlainType::of_literal(&options.value_of(ctor.local_name(), i))),
    )
}

/// Returns the plain type a scalar-convertible declaration wraps.
fn scalar_type(declaration: &Declaration) -> PlainType {
    PlainType::common(declaration.constructors().iter().map(|ctor| {
        ctor.arguments
            .first()
            .and_then(Argument::builtin)
            .map_or(PlainType::Mixed, PlainType::of_builtin)
    }))
}

// =============================================================================
// Field Conversions
// =============================================================================

const ELEMENT: &str = "$value";

/// Converts a whole field value (list and nullable aware) into plain form.
///
/// # Errors
/// Propagates conversion errors of the element type.
pub fn field_to_plain(
    ty: &ResolvedType<'_>,
    argument: &Argument,
    value: &str,
    owner: &str,
) -> Result<String> {
    let converted = if argument.is_list {
        let (element, _) = ty.to_plain(ELEMENT, owner)?;
        if element == ELEMENT {
            value.to_string()
        } else {
            format!("\\array_map(static fn ($value) => {element}, {value})")
        }
    } else {
        ty.to_plain(value, owner)?.0
    };
    Ok(null_guarded(argument, value, converted))
}

/// Builds a whole field value (list and nullable aware) from plain form.
///
/// No type checks are emitted; use this where the plain value is trusted.
///
/// # Errors
/// Propagates conversion errors of the element type.
pub fn field_from_plain(
    ty: &ResolvedType<'_>,
    argument: &Argument,
    value: &str,
    namespace: &str,
    owner: &str,
) -> Result<String> {
    let converted = if argument.is_list {
        let (element, _) = ty.from_plain(ELEMENT, namespace, owner)?;
        if element == ELEMENT {
            value.to_string()
        } else {
            format!("\\array_map(static fn ($value) => {element}, {value})")
        }
    } else {
        ty.from_plain(value, namespace, owner)?.0
    };
    Ok(null_guarded(argument, value, converted))
}

fn null_guarded(argument: &Argument, value: &str, converted: String) -> String {
    if is_nullable(argument) && converted != value {
        format!("null === {value} ? null : {converted}")
    } else {
        converted
    }
}

/// Returns the plain element type of a field.
///
/// # Errors
/// Propagates conversion errors of the element type.
pub fn element_plain_type(
    ty: &ResolvedType<'_>,
    namespace: &str,
    owner: &str,
) -> Result<PlainType> {
    ty.from_plain(ELEMENT, namespace, owner).map(|(_, plain)| plain)
}
