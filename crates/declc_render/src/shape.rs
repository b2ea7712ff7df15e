//! Which kind of class an artifact is.

use std::fmt;

use declc_language::{Constructor, Declaration, DerivingKind};

/// The structural role of one artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Interface for a marker declaration.
    Marker,
    /// One final class standing for the whole declaration.
    Single,
    /// Abstract base of a sum type.
    SumBase,
    /// Final branch of a sum type.
    SumBranch,
    /// Abstract base of an enum.
    EnumBase,
    /// Final branch of an enum.
    EnumBranch,
}

impl Shape {
    /// Returns the shape of the artifact for `(declaration, constructor)`.
    ///
    /// `constructor` is `None` for the base or single artifact.
    #[must_use]
    pub fn of(declaration: &Declaration, constructor: Option<&Constructor>) -> Self {
        if declaration.is_marker() {
            return Self::Marker;
        }
        if renders_single(declaration) {
            return Self::Single;
        }
        match (declaration.is_enum(), constructor) {
            (true, None) => Self::EnumBase,
            (true, Some(_)) => Self::EnumBranch,
            (false, None) => Self::SumBase,
            (false, Some(_)) => Self::SumBranch,
        }
    }

    /// Returns true for abstract bases.
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Self::SumBase | Self::EnumBase)
    }

    /// Returns true for shapes whose fields live on the class itself.
    #[must_use]
    pub const fn has_fields(self) -> bool {
        matches!(self, Self::Single | Self::SumBranch)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Marker => "marker",
            Self::Single => "single",
            Self::SumBase => "sum base",
            Self::SumBranch => "sum branch",
            Self::EnumBase => "enum base",
            Self::EnumBranch => "enum branch",
        };
        f.write_str(name)
    }
}

/// Returns true if a data declaration renders as one class.
///
/// Besides the structural single-class case, `Uuid`, message and
/// `Exception` declarations always use their first constructor's fields
/// on one class named after the declaration.
#[must_use]
pub fn renders_single(declaration: &Declaration) -> bool {
    !declaration.is_marker()
        && !declaration.is_enum()
        && (declaration.is_single_class()
            || declaration.has_deriving(DerivingKind::Uuid)
            || declaration.has_deriving(DerivingKind::Exception)
            || declaration.message_role().is_some())
}

/// Returns the constructors that get their own artifact.
#[must_use]
pub fn branches(declaration: &Declaration) -> &[Constructor] {
    if declaration.is_marker() || renders_single(declaration) {
        &[]
    } else {
        declaration.constructors()
    }
}

/// Returns the constructor whose fields a single class carries.
#[must_use]
pub fn single_constructor(declaration: &Declaration) -> Option<&Constructor> {
    if renders_single(declaration) {
        declaration.constructors().first()
    } else {
        None
    }
}
