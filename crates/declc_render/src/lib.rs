//! Template and builder rendering engine for declc.
//!
//! This crate provides:
//! - `Renderer` - Turns a `DeclarationRegistry` into PHP artifacts
//! - `BuilderRegistry` - Placeholder keys mapped to ordered builder chains
//! - `RenderConfig` - Header, strict types, UUID, message and converter settings
//! - `normalize` - Whitespace normalization of generated code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builders;
pub mod config;
pub mod context;
pub mod engine;
pub mod normalize;
pub mod php;
pub mod resolve;
pub mod shape;
pub mod templates;

pub use builders::{Builder, BuilderRegistry, placeholder};
pub use config::{MessageBase, MessageConfig, RenderConfig, TypeConverter, UuidConfig};
pub use context::RenderContext;
pub use engine::{Artifact, RenderOutput, Renderer, placeholders, substitute};
pub use normalize::normalize;
pub use resolve::{PlainType, ResolvedType};
pub use shape::Shape;
