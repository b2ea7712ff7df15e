//! declc - Declaration compiler for immutable PHP value objects
//!
//! This crate re-exports all layers of the declc system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: declc_runtime    - Discovery, PSR-4 layout, compile pipeline, CLI
//! Layer 2: declc_render     - Templates, builders, type resolution, renderer
//! Layer 1: declc_language   - Lexer, parser, declarations, derivings, registry
//! Layer 0: declc_foundation - Error types, qualified names
//! ```

pub use declc_foundation as foundation;
pub use declc_language as language;
pub use declc_render as render;
pub use declc_runtime as runtime;
