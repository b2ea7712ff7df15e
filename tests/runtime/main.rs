//! Integration tests for Layer 3: Runtime
//!
//! Tests for discovery, output layout and whole compile runs on disk.

mod compile;
mod discovery;
mod resolver;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates a temporary directory holding `files` (relative path, contents).
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        write(&dir.path().join(name), contents);
    }
    dir
}

/// Writes a file, creating its parent directories.
pub fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
