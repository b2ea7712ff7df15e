//! Error types for the declc pipeline.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type used across all declc crates.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for declc operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto the context stack, creating the context if needed.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates an invalid deriving error.
    #[must_use]
    pub fn invalid_deriving(
        declaration: impl Into<String>,
        deriving: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidDeriving {
            declaration: declaration.into(),
            deriving: deriving.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid declaration error.
    #[must_use]
    pub fn invalid_declaration(declaration: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDeclaration {
            declaration: declaration.into(),
            reason: reason.into(),
        })
    }

    /// Creates a duplicate declaration error.
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateDeclaration(name.into()))
    }

    /// Creates an unresolved type error.
    #[must_use]
    pub fn unresolved_type(type_name: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedType {
            type_name: type_name.into(),
            declaration: declaration.into(),
        })
    }

    /// Creates an unsupported conversion error.
    #[must_use]
    pub fn unsupported_conversion(
        type_name: impl Into<String>,
        conversion: impl Into<String>,
        declaration: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnsupportedConversion {
            type_name: type_name.into(),
            conversion: conversion.into(),
            declaration: declaration.into(),
        })
    }

    /// Creates an unresolved placeholder error.
    #[must_use]
    pub fn unresolved_placeholder(placeholder: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedPlaceholder {
            placeholder: placeholder.into(),
            artifact: artifact.into(),
        })
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: err.to_string(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error was raised while parsing DSL text.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self.kind, ErrorKind::ParseError { .. })
    }

    /// Returns true if this error was raised while rendering artifacts.
    #[must_use]
    pub fn is_render_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnresolvedType { .. }
                | ErrorKind::UnsupportedConversion { .. }
                | ErrorKind::UnresolvedPlaceholder { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed DSL token sequence.
    #[error("{source_id}:{line}:{column}: {message}, found {found}")]
    ParseError {
        /// What the parser expected or why the input was rejected.
        message: String,
        /// Description of the token actually found.
        found: String,
        /// Identifier of the input (usually a file path).
        source_id: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A requested deriving does not fit the declaration shape.
    #[error("invalid deriving {deriving} on {declaration}: {reason}")]
    InvalidDeriving {
        /// Qualified name of the declaration.
        declaration: String,
        /// Name of the deriving.
        deriving: String,
        /// The violated rule.
        reason: String,
    },

    /// A declaration violates a structural invariant.
    #[error("invalid declaration {declaration}: {reason}")]
    InvalidDeclaration {
        /// Qualified name of the declaration.
        declaration: String,
        /// The violated rule.
        reason: String,
    },

    /// Two declarations share an identity.
    #[error("duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// A type reference is neither in the registry nor configured.
    #[error("unresolved type {type_name} referenced from {declaration}")]
    UnresolvedType {
        /// The qualified type name.
        type_name: String,
        /// Qualified name of the referencing declaration.
        declaration: String,
    },

    /// A resolved type offers no way to perform a required conversion.
    #[error("type {type_name} used in {declaration} does not support {conversion}")]
    UnsupportedConversion {
        /// The qualified type name.
        type_name: String,
        /// The conversion that was requested (e.g. "toArray").
        conversion: String,
        /// Qualified name of the referencing declaration.
        declaration: String,
    },

    /// A template placeholder was left without an applicable builder.
    #[error("unresolved placeholder {{{{{placeholder}}}}} in {artifact}")]
    UnresolvedPlaceholder {
        /// The placeholder key.
        placeholder: String,
        /// Identifier of the artifact being rendered.
        artifact: String,
    },

    /// File system failure in the runtime layer.
    #[error("i/o error on {path}: {message}")]
    Io {
        /// The path involved.
        path: String,
        /// The underlying error message.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file identifier.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Stack of pipeline frames (outermost last).
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        for frame in &self.stack {
            write!(f, "\n  {frame}")?;
        }
        Ok(())
    }
}
