//! Core error types and naming helpers for declc.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`ErrorKind`] - Categorized failures of every pipeline stage
//! - Qualified-name helpers in [`naming`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod naming;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use naming::{NAMESPACE_SEPARATOR, is_identifier, join_qualified, split_qualified};
