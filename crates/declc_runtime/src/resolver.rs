//! Mapping of class identifiers to output file paths.

use std::fmt::Debug;
use std::path::PathBuf;

use declc_foundation::{Error, NAMESPACE_SEPARATOR, Result};

/// Decides where the artifact of a class is written.
pub trait PathResolver: Debug {
    /// Returns the output path of the class `identifier`.
    ///
    /// # Errors
    /// Returns an error if the identifier has no place in the output layout.
    fn resolve(&self, identifier: &str) -> Result<PathBuf>;
}

/// PSR-4 layout: classes under `prefix` live below `directory`, one
/// directory per remaining namespace segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Psr4Resolver {
    prefix: String,
    directory: PathBuf,
}

impl Psr4Resolver {
    /// Creates a resolver for `prefix` rooted at `directory`.
    #[must_use]
    pub fn new(prefix: &str, directory: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.trim_matches(NAMESPACE_SEPARATOR).to_string(),
            directory: directory.into(),
        }
    }

    /// Returns the namespace prefix without surrounding separators.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the output root.
    #[must_use]
    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    fn relative<'a>(&self, identifier: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return Some(identifier);
        }
        identifier
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
    }
}

impl PathResolver for Psr4Resolver {
    fn resolve(&self, identifier: &str) -> Result<PathBuf> {
        let identifier = identifier.trim_start_matches(NAMESPACE_SEPARATOR);
        let relative = self
            .relative(identifier)
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| {
                Error::invalid_declaration(
                    identifier,
                    format!("not inside the output namespace '{}'", self.prefix),
                )
            })?;

        let mut path = self.directory.clone();
        path.extend(relative.split(NAMESPACE_SEPARATOR));
        path.set_extension("php");
        Ok(path)
    }
}
