//! Input file discovery.

use std::io;
use std::path::{Path, PathBuf};

use declc_foundation::{Error, Result};
use walkdir::WalkDir;

/// Collects the DSL files named by `paths`.
///
/// Directories are walked recursively and contribute files whose extension
/// matches `extension` (with or without the leading dot). Files named
/// explicitly are always accepted. The result is sorted and free of
/// duplicates.
///
/// # Errors
/// Returns `Io` when a path does not exist or a directory cannot be read.
pub fn discover<P: AsRef<Path>>(paths: &[P], extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            walk(path, extension, &mut files)?;
        } else {
            return Err(Error::io(
                path.display().to_string(),
                &io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }

    files.sort();
    files.dedup();
    log::info!("discovered {} input file(s)", files.len());
    Ok(files)
}

fn walk(root: &Path, extension: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::io(root.display().to_string(), &io::Error::from(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            log::debug!("found {}", path.display());
            files.push(path.to_path_buf());
        }
    }
    Ok(())
}
