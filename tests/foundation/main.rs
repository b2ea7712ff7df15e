//! Integration tests for Layer 0: Foundation
//!
//! Tests for error types and qualified names.

mod errors;
mod naming;
