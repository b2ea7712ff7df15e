//! Cross-file symbol table of declarations.
//!
//! The [`DeclarationRegistry`] keeps declarations in insertion order and
//! indexes them two ways:
//! - by qualified declaration name
//! - by qualified constructor name, so an argument typed with a sum-type
//!   branch resolves to the declaration owning it
//!
//! Enum options and scalar wrappers are never indexed as constructors.
//!
//! Storage is persistent (`im`), so [`merge`](DeclarationRegistry::merge)
//! and [`add`](DeclarationRegistry::add) share structure with their inputs.

use declc_foundation::{Error, Result};
use im::{HashMap, Vector};

use crate::declaration::Declaration;

// =============================================================================
// DeclarationRegistry
// =============================================================================

/// Append-only, immutable-by-sharing collection of declarations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeclarationRegistry {
    declarations: Vector<Declaration>,
    by_name: HashMap<String, usize>,
    by_constructor: HashMap<String, usize>,
}

impl DeclarationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from declarations, in order.
    ///
    /// # Errors
    /// Returns `DuplicateDeclaration` on the first identity collision.
    pub fn from_declarations(declarations: impl IntoIterator<Item = Declaration>) -> Result<Self> {
        let mut registry = Self::new();
        for declaration in declarations {
            registry.add(declaration)?;
        }
        Ok(registry)
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if the registry holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Adds a declaration.
    ///
    /// # Errors
    /// Returns `DuplicateDeclaration` when the declaration's name is taken,
    /// or when one of its constructors collides with a known declaration
    /// or with another declaration's constructor. The registry is left
    /// unchanged on error.
    pub fn add(&mut self, declaration: Declaration) -> Result<()> {
        let name = declaration.qualified_name();
        if self.by_name.contains_key(name) {
            return Err(Error::duplicate(name));
        }
        if let Some(&owner) = self.by_constructor.get(name) {
            return Err(Error::duplicate(format!(
                "{name} (already a constructor of {})",
                self.declarations[owner].qualified_name()
            )));
        }

        let indexed = indexed_constructors(&declaration);
        for ctor in &indexed {
            if ctor == name {
                continue;
            }
            if self.by_name.contains_key(ctor.as_str()) {
                return Err(Error::duplicate(format!(
                    "{ctor} (constructor of {name} shadows a declaration)"
                )));
            }
            if let Some(&owner) = self.by_constructor.get(ctor.as_str()) {
                return Err(Error::duplicate(format!(
                    "{ctor} (constructor of both {} and {name})",
                    self.declarations[owner].qualified_name()
                )));
            }
        }

        let index = self.declarations.len();
        self.by_name.insert(name.to_string(), index);
        for ctor in indexed {
            self.by_constructor.insert(ctor, index);
        }
        log::trace!("registered {name}");
        self.declarations.push_back(declaration);
        Ok(())
    }

    /// Returns a new registry holding `self` followed by `other`.
    ///
    /// Neither input is modified.
    ///
    /// # Errors
    /// Returns `DuplicateDeclaration` if the two registries share an identity.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        let mut merged = self.clone();
        for declaration in &other.declarations {
            merged.add(declaration.clone())?;
        }
        Ok(merged)
    }

    /// Looks up a declaration by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&Declaration> {
        self.by_name
            .get(qualified_name)
            .map(|&i| &self.declarations[i])
    }

    /// Returns true if a declaration of that name exists.
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.by_name.contains_key(qualified_name)
    }

    /// Returns the declaration owning the constructor of that qualified name.
    #[must_use]
    pub fn owner_of_constructor(&self, constructor: &str) -> Option<&Declaration> {
        self.by_constructor
            .get(constructor)
            .map(|&i| &self.declarations[i])
    }

    /// Resolves a type reference: declaration names first, then constructors.
    #[must_use]
    pub fn resolve_type(&self, type_name: &str) -> Option<&Declaration> {
        let type_name = type_name.trim_start_matches('\\');
        self.get(type_name)
            .or_else(|| self.owner_of_constructor(type_name))
    }

    /// Iterates declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Returns qualified names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.declarations
            .iter()
            .map(Declaration::qualified_name)
            .collect()
    }
}

impl<'a> IntoIterator for &'a DeclarationRegistry {
    type Item = &'a Declaration;
    type IntoIter = im::vector::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

fn indexed_constructors(declaration: &Declaration) -> Vec<String> {
    if declaration.is_enum() {
        return Vec::new();
    }
    declaration
        .constructors()
        .iter()
        .filter(|c| !c.is_scalar())
        .map(|c| c.name.clone())
        .collect()
}
