//! Input discovery, output layout, the compile pipeline and the `declc` CLI.
//!
//! This crate provides:
//! - [`discover`] - Collects DSL files from files and directories
//! - [`PathResolver`] / [`Psr4Resolver`] - Map class names to output paths
//! - [`Compiler`] - Parse, render and write in one pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compiler;
pub mod config;
pub mod discovery;
pub mod resolver;

pub use compiler::{CompileSummary, Compiler};
pub use config::{CompileConfig, DEFAULT_EXTENSION};
pub use discovery::discover;
pub use resolver::{PathResolver, Psr4Resolver};
