//! Shared, read-only state handed to every builder.

use declc_language::{Constructor, Declaration, DeclarationRegistry};

use crate::config::RenderConfig;
use crate::shape::Shape;

/// What a builder can see besides the declaration it renders.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    /// Every declaration of the run, for cross-declaration lookups.
    pub registry: &'a DeclarationRegistry,
    /// Engine configuration.
    pub config: &'a RenderConfig,
}

impl<'a> RenderContext<'a> {
    /// Creates a context.
    #[must_use]
    pub const fn new(registry: &'a DeclarationRegistry, config: &'a RenderConfig) -> Self {
        Self { registry, config }
    }
}

/// Returns the namespace the artifact for `(declaration, constructor)` lives in.
#[must_use]
pub fn artifact_namespace<'d>(declaration: &'d Declaration, constructor: Option<&'d Constructor>) -> &'d str {
    match (Shape::of(declaration, constructor), constructor) {
        (Shape::SumBranch | Shape::EnumBranch, Some(ctor)) => ctor.namespace(),
        _ => declaration.namespace(),
    }
}

/// Returns the local class name of the artifact for `(declaration, constructor)`.
#[must_use]
pub fn artifact_class<'d>(declaration: &'d Declaration, constructor: Option<&'d Constructor>) -> &'d str {
    match (Shape::of(declaration, constructor), constructor) {
        (Shape::SumBranch | Shape::EnumBranch, Some(ctor)) => ctor.local_name(),
        _ => declaration.name(),
    }
}
