//! Derivings: the behaviours a declaration can request.
//!
//! Each [`Deriving`] carries its own structural precondition, checked by
//! [`Deriving::check_definition`] while a declaration is built, and a set of
//! derivings it cannot be combined with ([`DerivingKind::conflicts_with`]).

use std::fmt;

use declc_foundation::{Error, Result, is_identifier};

use super::Declaration;
use super::types::{BuiltinType, Constructor, Literal};

// =============================================================================
// Deriving Kind
// =============================================================================

/// Payload-free identity of a deriving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivingKind {
    /// `Equals`
    Equals,
    /// `ToArray`
    ToArray,
    /// `FromArray`
    FromArray,
    /// `ToScalar`
    ToScalar,
    /// `FromScalar`
    FromScalar,
    /// `ToString`
    ToString,
    /// `FromString`
    FromString,
    /// `Enum`
    Enum,
    /// `Uuid`
    Uuid,
    /// `Command`
    Command,
    /// `Query`
    Query,
    /// `DomainEvent`
    DomainEvent,
    /// `AggregateChanged`
    AggregateChanged,
    /// `Exception`
    Exception,
}

impl DerivingKind {
    /// Every deriving kind, in canonical order.
    pub const ALL: [Self; 14] = [
        Self::Equals,
        Self::ToArray,
        Self::FromArray,
        Self::ToScalar,
        Self::FromScalar,
        Self::ToString,
        Self::FromString,
        Self::Enum,
        Self::Uuid,
        Self::Command,
        Self::Query,
        Self::DomainEvent,
        Self::AggregateChanged,
        Self::Exception,
    ];

    /// Looks up a deriving by its DSL name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Returns the DSL name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::ToArray => "ToArray",
            Self::FromArray => "FromArray",
            Self::ToScalar => "ToScalar",
            Self::FromScalar => "FromScalar",
            Self::ToString => "ToString",
            Self::FromString => "FromString",
            Self::Enum => "Enum",
            Self::Uuid => "Uuid",
            Self::Command => "Command",
            Self::Query => "Query",
            Self::DomainEvent => "DomainEvent",
            Self::AggregateChanged => "AggregateChanged",
            Self::Exception => "Exception",
        }
    }

    /// Returns true for the message roles.
    #[must_use]
    pub const fn is_message(self) -> bool {
        matches!(
            self,
            Self::Command | Self::Query | Self::DomainEvent | Self::AggregateChanged
        )
    }

    /// Returns true if the two derivings cannot appear on one declaration.
    ///
    /// The relation is symmetric.
    #[must_use]
    pub fn conflicts_with(self, other: Self) -> bool {
        Self::one_way_conflict(self, other) || Self::one_way_conflict(other, self)
    }

    fn one_way_conflict(a: Self, b: Self) -> bool {
        if a == b {
            return false;
        }
        match a {
            Self::Enum | Self::Uuid => true,
            k if k.is_message() => {
                b.is_message() || matches!(b, Self::Exception | Self::ToArray | Self::FromArray)
            }
            Self::Exception => matches!(b, Self::FromArray | Self::FromScalar | Self::FromString),
            _ => false,
        }
    }
}

impl fmt::Display for DerivingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Deriving Payloads
// =============================================================================

/// Options of the `Enum` deriving.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct EnumOptions {
    /// Value mapping from `with (Ctor: value, ...)`, in source order.
    pub values: Option<Vec<(String, Literal)>>,
    /// `Enum(useValue)`: string conversions use the value instead of the name.
    pub use_value: bool,
}

impl EnumOptions {
    /// Returns the value of the constructor at `index`.
    ///
    /// Without a mapping the value is the constructor's position.
    #[must_use]
    pub fn value_of(&self, name: &str, index: usize) -> Literal {
        self.values
            .as_ref()
            .and_then(|values| values.iter().find(|(k, _)| k == name))
            .map_or_else(
                || Literal::Int(i64::try_from(index).unwrap_or(i64::MAX)),
                |(_, v)| v.clone(),
            )
    }
}

/// A named factory of an `Exception` deriving.
///
/// Corresponds to `Exception(withEmail: "No user {{email}}")`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExceptionConstructor {
    /// Factory method name.
    pub name: String,
    /// Message template; `{{arg}}` or `{{$arg}}` interpolate arguments.
    pub message: String,
}

impl ExceptionConstructor {
    /// Creates a named factory.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns the argument names referenced by the message, in order.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        template_references(&self.message)
            .into_iter()
            .map(|(_, name)| name)
            .collect()
    }
}

/// Finds `{{name}}` / `{{$name}}` references in a message template.
///
/// Returns `(byte range, argument name)` pairs in order of appearance.
#[must_use]
pub fn template_references(message: &str) -> Vec<(std::ops::Range<usize>, &str)> {
    let mut found = Vec::new();
    let mut offset = 0;
    while let Some(open) = message[offset..].find("{{") {
        let start = offset + open;
        let Some(close) = message[start + 2..].find("}}") else {
            break;
        };
        let end = start + 2 + close + 2;
        let inner = message[start + 2..end - 2].trim();
        let name = inner.strip_prefix('$').unwrap_or(inner);
        if is_identifier(name) {
            found.push((start..end, name));
        }
        offset = end;
    }
    found
}

/// Options of the `Exception` deriving.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ExceptionOptions {
    /// Fully qualified parent exception class; `None` means the default.
    pub parent: Option<String>,
    /// Default message of the base constructor.
    pub default_message: Option<String>,
    /// Named factories.
    pub constructors: Vec<ExceptionConstructor>,
}

// =============================================================================
// Deriving
// =============================================================================

/// A behaviour requested by a declaration, with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Deriving {
    /// Structural equality.
    Equals,
    /// Conversion to an array.
    ToArray,
    /// Construction from an array.
    FromArray,
    /// Conversion to the wrapped scalar.
    ToScalar,
    /// Construction from a scalar.
    FromScalar,
    /// Conversion to a string.
    ToString,
    /// Construction from a string.
    FromString,
    /// Enumeration semantics.
    Enum(EnumOptions),
    /// UUID identifier.
    Uuid,
    /// Command message.
    Command,
    /// Query message.
    Query,
    /// Domain event message.
    DomainEvent,
    /// Event-sourced aggregate change message.
    AggregateChanged,
    /// Exception class.
    Exception(ExceptionOptions),
}

impl Deriving {
    /// Creates a deriving without parameters from its kind.
    #[must_use]
    pub fn from_kind(kind: DerivingKind) -> Self {
        match kind {
            DerivingKind::Equals => Self::Equals,
            DerivingKind::ToArray => Self::ToArray,
            DerivingKind::FromArray => Self::FromArray,
            DerivingKind::ToScalar => Self::ToScalar,
            DerivingKind::FromScalar => Self::FromScalar,
            DerivingKind::ToString => Self::ToString,
            DerivingKind::FromString => Self::FromString,
            DerivingKind::Enum => Self::Enum(EnumOptions::default()),
            DerivingKind::Uuid => Self::Uuid,
            DerivingKind::Command => Self::Command,
            DerivingKind::Query => Self::Query,
            DerivingKind::DomainEvent => Self::DomainEvent,
            DerivingKind::AggregateChanged => Self::AggregateChanged,
            DerivingKind::Exception => Self::Exception(ExceptionOptions::default()),
        }
    }

    /// Returns the payload-free kind.
    #[must_use]
    pub const fn kind(&self) -> DerivingKind {
        match self {
            Self::Equals => DerivingKind::Equals,
            Self::ToArray => DerivingKind::ToArray,
            Self::FromArray => DerivingKind::FromArray,
            Self::ToScalar => DerivingKind::ToScalar,
            Self::FromScalar => DerivingKind::FromScalar,
            Self::ToString => DerivingKind::ToString,
            Self::FromString => DerivingKind::FromString,
            Self::Enum(_) => DerivingKind::Enum,
            Self::Uuid => DerivingKind::Uuid,
            Self::Command => DerivingKind::Command,
            Self::Query => DerivingKind::Query,
            Self::DomainEvent => DerivingKind::DomainEvent,
            Self::AggregateChanged => DerivingKind::AggregateChanged,
            Self::Exception(_) => DerivingKind::Exception,
        }
    }

    /// Returns the DSL name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Checks the structural precondition of this deriving.
    ///
    /// # Errors
    /// Returns `InvalidDeriving` naming the violated rule.
    pub fn check_definition(&self, declaration: &Declaration) -> Result<()> {
        let fail = |reason: String| {
            Err(Error::invalid_deriving(
                declaration.qualified_name(),
                self.name(),
                reason,
            ))
        };
        let constructors = declaration.constructors();

        match self {
            Self::Equals => Ok(()),
            Self::ToArray | Self::FromArray => {
                for ctor in constructors {
                    if ctor.is_scalar() {
                        return fail(format!(
                            "scalar constructor {} must use ToScalar/FromScalar instead",
                            ctor.name
                        ));
                    }
                    if ctor.arguments.is_empty() {
                        return fail(format!(
                            "constructor {} must have at least one argument",
                            ctor.local_name()
                        ));
                    }
                }
                Ok(())
            }
            Self::ToScalar | Self::FromScalar => {
                for ctor in constructors {
                    match ctor.arguments.as_slice() {
                        [arg] if !arg.is_list => {}
                        [_] => {
                            return fail(format!(
                                "constructor {} wraps a list, not a scalar",
                                ctor.local_name()
                            ));
                        }
                        _ => {
                            return fail(format!(
                                "constructor {} must have exactly one argument",
                                ctor.local_name()
                            ));
                        }
                    }
                }
                Ok(())
            }
            Self::ToString | Self::FromString => {
                for ctor in constructors {
                    let [arg] = ctor.arguments.as_slice() else {
                        return fail(format!(
                            "constructor {} must have exactly one argument",
                            ctor.local_name()
                        ));
                    };
                    if arg.is_list {
                        return fail(format!("argument ${} must not be a list", arg.name));
                    }
                    if let Some(builtin) = arg.builtin() {
                        if builtin != BuiltinType::String {
                            return fail(format!(
                                "argument ${} must be a string, {builtin} given",
                                arg.name
                            ));
                        }
                    }
                }
                Ok(())
            }
            Self::Enum(options) => check_enum(declaration, options).or_else(fail),
            Self::Uuid => match constructors {
                [ctor] if ctor.is_scalar() => fail("requires a named constructor".into()),
                [ctor] if !ctor.arguments.is_empty() => {
                    fail(format!("constructor {} must have no arguments", ctor.local_name()))
                }
                [_] if !declaration.conditions().is_empty() => {
                    fail("conditions are not supported".into())
                }
                [_] => Ok(()),
                _ => fail("requires exactly one constructor".into()),
            },
            Self::Command | Self::Query | Self::DomainEvent => {
                single_named_constructor(constructors).map(|_| ()).or_else(fail)
            }
            Self::AggregateChanged => {
                let ctor = match single_named_constructor(constructors) {
                    Ok(ctor) => ctor,
                    Err(reason) => return fail(reason),
                };
                match ctor.arguments.first() {
                    None => fail("the first argument must be the aggregate id".into()),
                    Some(id) if id.type_hint.is_none() || id.nullable || id.is_list => fail(
                        format!("aggregate id ${} must be typed, non-nullable and not a list", id.name),
                    ),
                    Some(_) => Ok(()),
                }
            }
            Self::Exception(options) => check_exception(constructors, options).or_else(fail),
        }
    }
}

impl fmt::Display for Deriving {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn single_named_constructor(constructors: &[Constructor]) -> std::result::Result<&Constructor, String> {
    match constructors {
        [ctor] if ctor.is_scalar() => Err("requires a named constructor".into()),
        [ctor] => Ok(ctor),
        _ => Err("requires exactly one constructor".into()),
    }
}

fn check_enum(declaration: &Declaration, options: &EnumOptions) -> std::result::Result<(), String> {
    let constructors = declaration.constructors();
    if constructors.len() < 2 {
        return Err("requires at least two constructors".into());
    }
    if !declaration.conditions().is_empty() {
        return Err("conditions are not supported".into());
    }
    for ctor in constructors {
        if ctor.is_scalar() {
            return Err(format!("scalar constructor {} is not an enum option", ctor.name));
        }
        if !ctor.arguments.is_empty() {
            return Err(format!(
                "constructor {} must have no arguments",
                ctor.local_name()
            ));
        }
        if ctor.namespace() != declaration.namespace() {
            return Err(format!(
                "constructor {} must not carry a namespace",
                ctor.name
            ));
        }
    }

    if let Some(values) = &options.values {
        let mut keys: Vec<&str> = values.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(format!("value for {} given twice", pair[0]));
        }
        let mut names: Vec<&str> = constructors.iter().map(Constructor::local_name).collect();
        names.sort_unstable();
        if keys != names {
            return Err(format!(
                "value mapping keys [{}] must match constructors [{}]",
                keys.join(", "),
                names.join(", ")
            ));
        }
    }
    Ok(())
}

const RESERVED_EXCEPTION_ARGUMENTS: [&str; 5] = ["message", "code", "previous", "file", "line"];

fn check_exception(
    constructors: &[Constructor],
    options: &ExceptionOptions,
) -> std::result::Result<(), String> {
    let ctor = single_named_constructor(constructors)?;

    if let Some(arg) = ctor
        .arguments
        .iter()
        .find(|a| RESERVED_EXCEPTION_ARGUMENTS.contains(&a.name.as_str()))
    {
        return Err(format!("argument ${} clashes with the exception constructor", arg.name));
    }

    let mut seen: Vec<&str> = Vec::new();
    for factory in &options.constructors {
        if seen.contains(&factory.name.as_str()) {
            return Err(format!("named constructor {} given twice", factory.name));
        }
        seen.push(&factory.name);
        for reference in factory.references() {
            if ctor.argument(reference).is_none() {
                return Err(format!(
                    "message of {} references unknown argument ${reference}",
                    factory.name
                ));
            }
        }
    }
    Ok(())
}
