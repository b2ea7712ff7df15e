//! The rendering engine.
//!
//! For every declaration the engine composes the templates of each
//! artifact, then repeatedly replaces `{{key}}` placeholders with builder
//! output until a pass changes nothing. Builder output may itself contain
//! placeholders; they are picked up by the next pass.

use std::collections::HashSet;

use declc_foundation::{Error, Result};
use declc_language::{Constructor, Declaration, DeclarationRegistry};

use crate::builders::{BuilderRegistry, placeholder};
use crate::config::RenderConfig;
use crate::context::RenderContext;
use crate::normalize::normalize;
use crate::shape::{Shape, branches, single_constructor};
use crate::templates::{BODY_SLOT, base_template, body_fragment, deriving_fragments};

// =============================================================================
// Output
// =============================================================================

/// One generated class or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Fully qualified class name.
    pub identifier: String,
    /// Complete PHP source.
    pub code: String,
}

/// The artifacts of one render run, in output order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOutput {
    artifacts: Vec<Artifact>,
}

impl RenderOutput {
    /// Returns the number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Looks up an artifact by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.identifier == identifier)
    }

    /// Iterates artifacts in output order.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// Returns the identifiers in output order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        self.artifacts.iter().map(|a| a.identifier.as_str()).collect()
    }
}

impl IntoIterator for RenderOutput {
    type Item = Artifact;
    type IntoIter = std::vec::IntoIter<Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

impl<'a> IntoIterator for &'a RenderOutput {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Renders a declaration registry into PHP artifacts.
#[derive(Clone, Debug)]
pub struct Renderer {
    config: RenderConfig,
    builders: BuilderRegistry,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer {
    /// Creates a renderer with the standard builders.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            builders: BuilderRegistry::standard(),
        }
    }

    /// Builder method to replace the builder registry.
    #[must_use]
    pub fn with_builders(mut self, builders: BuilderRegistry) -> Self {
        self.builders = builders;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Returns the builder registry for customization.
    pub fn builders_mut(&mut self) -> &mut BuilderRegistry {
        &mut self.builders
    }

    /// Renders every declaration of the registry.
    ///
    /// Artifacts follow declaration order; a base comes before its branches,
    /// branches follow constructor order.
    ///
    /// # Errors
    /// Returns the first builder error, `UnresolvedPlaceholder` when a
    /// placeholder survives, and `DuplicateDeclaration` when two artifacts
    /// share an identifier.
    pub fn render(&self, registry: &DeclarationRegistry) -> Result<RenderOutput> {
        let ctx = RenderContext::new(registry, &self.config);
        let mut artifacts = Vec::with_capacity(registry.len());
        let mut seen = HashSet::new();

        for declaration in registry {
            for artifact in self.render_declaration(&ctx, declaration)? {
                if !seen.insert(artifact.identifier.clone()) {
                    return Err(Error::duplicate(artifact.identifier));
                }
                artifacts.push(artifact);
            }
        }

        log::debug!("rendered {} artifact(s)", artifacts.len());
        Ok(RenderOutput { artifacts })
    }

    /// Renders the artifacts of one declaration.
    ///
    /// # Errors
    /// See [`Renderer::render`].
    pub fn render_declaration(
        &self,
        ctx: &RenderContext<'_>,
        declaration: &Declaration,
    ) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::with_capacity(1 + declaration.constructors().len());
        artifacts.push(self.render_artifact(
            ctx,
            declaration,
            single_constructor(declaration),
            declaration.qualified_name(),
        )?);
        for ctor in branches(declaration) {
            artifacts.push(self.render_artifact(ctx, declaration, Some(ctor), &ctor.name)?);
        }
        Ok(artifacts)
    }

    fn render_artifact(
        &self,
        ctx: &RenderContext<'_>,
        declaration: &Declaration,
        constructor: Option<&Constructor>,
        identifier: &str,
    ) -> Result<Artifact> {
        let shape = Shape::of(declaration, constructor);
        let mut code = compose(declaration, shape);

        for pass in 1..=self.config.max_passes {
            let keys: Vec<String> = placeholders(&code)
                .into_iter()
                .map(str::to_string)
                .collect();
            let mut changed = false;
            for key in &keys {
                let value = self
                    .builders
                    .apply(ctx, key, declaration, constructor)
                    .map_err(|e| e.with_frame(format!("while rendering {identifier}")))?;
                if let Some(value) = value {
                    code = substitute(&code, key, &value);
                    changed = true;
                }
            }
            log::trace!("{identifier}: pass {pass} resolved {} key(s)", keys.len());
            if !changed {
                break;
            }
        }

        if let Some(key) = placeholders(&code).first() {
            return Err(Error::unresolved_placeholder(*key, identifier)
                .with_frame(format!("while rendering {identifier}")));
        }

        log::debug!("rendered {identifier} ({shape})");
        Ok(Artifact {
            identifier: identifier.to_string(),
            code: normalize(&code),
        })
    }
}

// =============================================================================
// Templates and Placeholders
// =============================================================================

/// Builds the unexpanded template of an artifact.
fn compose(declaration: &Declaration, shape: Shape) -> String {
    let template = base_template(shape);
    let Some(body) = body_fragment(shape) else {
        return template.to_string();
    };
    let mut parts = vec![body];
    for deriving in declaration.derivings() {
        parts.extend(deriving_fragments(deriving.kind(), shape));
    }
    substitute(template, BODY_SLOT, &parts.join("\n\n"))
}

/// Returns the distinct placeholder keys of `text` in order of appearance.
///
/// Keys match `[a-z][a-z0-9_]*`.
#[must_use]
pub fn placeholders(text: &str) -> Vec<&str> {
    let mut keys = Vec::new();
    let mut offset = 0;
    while let Some(open) = text[offset..].find("{{") {
        let open_at = offset + open;
        let start = open_at + 2;
        let len = text[start..]
            .bytes()
            .take_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_')
            .count();
        let key = &text[start..start + len];
        let valid = key.starts_with(|c: char| c.is_ascii_lowercase())
            && text[start + len..].starts_with("}}");
        if valid {
            if !keys.contains(&key) {
                keys.push(key);
            }
            offset = start + len + 2;
        } else {
            // A third brace may open the real placeholder.
            offset = open_at + 1;
        }
    }
    keys
}

/// Replaces every `{{key}}` in `text` with `value`.
///
/// When a placeholder is preceded only by whitespace on its line, the
/// following lines of `value` get the same indentation.
#[must_use]
pub fn substitute(text: &str, key: &str, value: &str) -> String {
    let needle = placeholder(key);
    let mut out = String::with_capacity(text.len() + value.len());
    let mut rest = text;

    while let Some(pos) = rest.find(&needle) {
        out.push_str(&rest[..pos]);
        let line_start = out.rfind('\n').map_or(0, |i| i + 1);
        let prefix = &out[line_start..];
        if !prefix.is_empty() && prefix.chars().all(char::is_whitespace) {
            let prefix = prefix.to_string();
            out.push_str(&reindent(value, &prefix));
        } else {
            out.push_str(value);
        }
        rest = &rest[pos + needle.len()..];
    }
    out.push_str(rest);
    out
}

fn reindent(value: &str, prefix: &str) -> String {
    let mut lines = value.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    out
}
