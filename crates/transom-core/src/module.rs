//! Module descriptors for client-side source files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A client-side source module and its exported callables.
///
/// The descriptor is immutable: the export list is fixed at construction,
/// either by introspecting the source text or by explicit declaration, and
/// the mapping step never modifies it. The pipeline does not own the
/// descriptor; source bytes are re-read from disk on every compilation so
/// edits are picked up.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    path: PathBuf,
    name: String,
    exports: Vec<String>,
}

impl ModuleDescriptor {
    /// Build a descriptor by scanning the source for top-level functions.
    ///
    /// Underscore-prefixed names are treated as private and skipped, as are
    /// indented (nested) definitions.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let name = module_name(&path)?;
        let source = fs::read_to_string(&path)?;
        let exports = discover_exports(&source);
        Ok(Self {
            path,
            name,
            exports,
        })
    }

    /// Build a descriptor with a declared export list, skipping introspection.
    pub fn with_exports(path: impl AsRef<Path>, exports: Vec<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let name = module_name(&path)?;
        Ok(Self {
            path,
            name,
            exports,
        })
    }

    /// Path to the module source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logical module name (the file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the exported callables, in source order.
    pub fn exports(&self) -> &[String] {
        &self.exports
    }
}

fn module_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
        .ok_or_else(|| Error::InvalidModulePath(path.to_path_buf()))
}

/// Scan source text for top-level `def name(...)` definitions.
fn discover_exports(source: &str) -> Vec<String> {
    let mut exports: Vec<String> = Vec::new();
    for line in source.lines() {
        // Top level only: indented definitions are nested helpers.
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        let Some(rest) = line
            .strip_prefix("async def ")
            .or_else(|| line.strip_prefix("def "))
        else {
            continue;
        };
        let Some(open) = rest.find('(') else {
            continue;
        };
        let name = rest[..open].trim();
        if name.is_empty() || name.starts_with('_') {
            continue;
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            continue;
        }
        if !exports.iter().any(|n| n == name) {
            exports.push(name.to_string());
        }
    }
    exports
}
