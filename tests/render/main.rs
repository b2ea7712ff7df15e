//! Integration tests for Layer 2: Render
//!
//! Tests for complete artifacts rendered from DSL source.

mod customization;
mod enums;
mod messages;
mod records;
mod special;
mod sums;

use declc_language::parse;
use declc_render::{RenderConfig, RenderOutput, Renderer};

/// Parses and renders `source` with the default configuration.
pub fn render(source: &str) -> RenderOutput {
    render_with(source, RenderConfig::default())
}

/// Parses and renders `source` with `config`.
pub fn render_with(source: &str, config: RenderConfig) -> RenderOutput {
    let registry = parse(source).unwrap();
    Renderer::new(config).render(&registry).unwrap()
}

/// Returns the code of one artifact.
pub fn code<'a>(output: &'a RenderOutput, identifier: &str) -> &'a str {
    &output
        .get(identifier)
        .unwrap_or_else(|| panic!("no artifact {identifier}"))
        .code
}
