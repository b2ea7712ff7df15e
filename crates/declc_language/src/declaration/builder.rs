//! Validating construction of declarations.

use std::collections::HashSet;

use declc_foundation::{Error, NAMESPACE_SEPARATOR, Result, is_identifier, join_qualified};

use super::Declaration;
use super::deriving::Deriving;
use super::types::{ALL_CONSTRUCTORS, Condition, Constructor, DeclarationKind};

/// Collects the parts of a declaration and validates them on [`build`].
///
/// [`build`]: DeclarationBuilder::build
#[derive(Clone, Debug)]
pub struct DeclarationBuilder {
    kind: DeclarationKind,
    namespace: String,
    name: String,
    constructors: Vec<Constructor>,
    derivings: Vec<Deriving>,
    conditions: Vec<Condition>,
    message_name: Option<String>,
    parent_marker: Option<String>,
    line: u32,
}

impl DeclarationBuilder {
    fn new(kind: DeclarationKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
            constructors: Vec::new(),
            derivings: Vec::new(),
            conditions: Vec::new(),
            message_name: None,
            parent_marker: None,
            line: 0,
        }
    }

    /// Starts a `data` declaration.
    #[must_use]
    pub fn data(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Data, namespace, name)
    }

    /// Starts a `marker` declaration.
    #[must_use]
    pub fn marker(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(DeclarationKind::Marker, namespace, name)
    }

    /// Appends a constructor.
    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Appends several constructors.
    #[must_use]
    pub fn constructors(mut self, constructors: impl IntoIterator<Item = Constructor>) -> Self {
        self.constructors.extend(constructors);
        self
    }

    /// Appends a deriving.
    #[must_use]
    pub fn deriving(mut self, deriving: Deriving) -> Self {
        self.derivings.push(deriving);
        self
    }

    /// Appends a condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Sets the message name override.
    #[must_use]
    pub fn message_name(mut self, message_name: impl Into<String>) -> Self {
        self.message_name = Some(message_name.into());
        self
    }

    /// Sets the parent marker.
    #[must_use]
    pub fn parent_marker(mut self, parent: impl Into<String>) -> Self {
        self.parent_marker = Some(parent.into());
        self
    }

    /// Records the source line.
    #[must_use]
    pub fn line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Returns the qualified name the declaration will have.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        join_qualified(&self.namespace, &self.name)
    }

    /// Validates everything and produces the declaration.
    ///
    /// # Errors
    /// Returns `InvalidDeclaration` when a structural invariant fails and
    /// `InvalidDeriving` when a deriving is duplicated, conflicting or does
    /// not fit the declaration's shape.
    pub fn build(self) -> Result<Declaration> {
        let qualified_name = self.qualified_name();
        let invalid = |reason: String| Error::invalid_declaration(qualified_name.clone(), reason);

        self.check_names().map_err(&invalid)?;
        self.check_kind().map_err(&invalid)?;
        self.check_constructors(&qualified_name).map_err(&invalid)?;
        self.check_conditions().map_err(&invalid)?;
        self.check_deriving_set(&qualified_name)?;
        self.check_message_name().map_err(&invalid)?;

        let declaration = Declaration {
            kind: self.kind,
            namespace: self.namespace,
            name: self.name,
            qualified_name,
            constructors: self.constructors,
            derivings: self.derivings,
            conditions: self.conditions,
            message_name: self.message_name,
            parent_marker: self.parent_marker,
            line: self.line,
        };

        for deriving in declaration.derivings() {
            deriving.check_definition(&declaration)?;
        }

        Ok(declaration)
    }

    fn check_names(&self) -> std::result::Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".into());
        }
        if !is_identifier(&self.name) {
            return Err(format!("'{}' is not a valid name", self.name));
        }
        if !self.namespace.is_empty()
            && !self
                .namespace
                .split(NAMESPACE_SEPARATOR)
                .all(is_identifier)
        {
            return Err(format!("'{}' is not a valid namespace", self.namespace));
        }
        Ok(())
    }

    fn check_kind(&self) -> std::result::Result<(), String> {
        match self.kind {
            DeclarationKind::Data => {
                if self.constructors.is_empty() {
                    return Err("data requires at least one constructor".into());
                }
                if self.parent_marker.is_some() {
                    return Err("only markers can extend a marker".into());
                }
            }
            DeclarationKind::Marker => {
                if !self.constructors.is_empty() {
                    return Err("markers have no constructors".into());
                }
                if !self.derivings.is_empty() {
                    return Err("markers have no derivings".into());
                }
                if !self.conditions.is_empty() {
                    return Err("markers have no conditions".into());
                }
                if self.message_name.is_some() {
                    return Err("markers have no message name".into());
                }
                if self.parent_marker.as_deref() == Some(self.qualified_name().as_str()) {
                    return Err("a marker cannot extend itself".into());
                }
            }
        }
        Ok(())
    }

    fn check_constructors(&self, qualified_name: &str) -> std::result::Result<(), String> {
        let mut names = HashSet::new();
        for ctor in &self.constructors {
            if !ctor.is_scalar() && !is_identifier(ctor.local_name()) {
                return Err(format!("'{}' is not a valid constructor name", ctor.name));
            }
            if !names.insert(ctor.name.as_str()) {
                return Err(format!("constructor {} declared twice", ctor.name));
            }

            let mut arguments = HashSet::new();
            for arg in &ctor.arguments {
                if !is_identifier(&arg.name) {
                    return Err(format!("'{}' is not a valid argument name", arg.name));
                }
                if !arguments.insert(arg.name.as_str()) {
                    return Err(format!(
                        "argument ${} declared twice in {}",
                        arg.name, ctor.name
                    ));
                }
            }
        }

        if self.constructors.len() > 1 {
            if let Some(scalar) = self.constructors.iter().find(|c| c.is_scalar()) {
                return Err(format!(
                    "scalar constructor {} must be the only constructor",
                    scalar.name
                ));
            }
            if self.constructors.iter().any(|c| c.name == qualified_name) {
                return Err(
                    "a constructor named like its declaration must be the only constructor".into(),
                );
            }
        }
        Ok(())
    }

    fn check_conditions(&self) -> std::result::Result<(), String> {
        for condition in &self.conditions {
            let target = condition.constructor.as_str();
            if target != ALL_CONSTRUCTORS
                && !self.constructors.iter().any(|c| c.local_name() == target)
            {
                return Err(format!("condition targets unknown constructor {target}"));
            }
            if condition.expression.trim().is_empty() {
                return Err("condition expression must not be empty".into());
            }
        }
        Ok(())
    }

    fn check_deriving_set(&self, qualified_name: &str) -> Result<()> {
        for (i, deriving) in self.derivings.iter().enumerate() {
            for other in &self.derivings[..i] {
                if other.kind() == deriving.kind() {
                    return Err(Error::invalid_deriving(
                        qualified_name,
                        deriving.name(),
                        "requested twice",
                    ));
                }
                if other.kind().conflicts_with(deriving.kind()) {
                    return Err(Error::invalid_deriving(
                        qualified_name,
                        deriving.name(),
                        format!("conflicts with {}", other.name()),
                    ));
                }
            }
        }
        Ok(())
    }

    fn check_message_name(&self) -> std::result::Result<(), String> {
        let Some(message_name) = &self.message_name else {
            return Ok(());
        };
        if message_name.is_empty() {
            return Err("message name must not be empty".into());
        }
        if !self.derivings.iter().any(|d| d.kind().is_message()) {
            return Err("a message name requires Command, Query, DomainEvent or AggregateChanged".into());
        }
        Ok(())
    }
}
