//! Build context and artifact directory layout.
//!
//! All pipeline state lives under an explicit root directory threaded through
//! every call, so independent contexts (one per test, per deployment, per
//! working tree) never share mutable state through the process working
//! directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::transpiler::Transpiler;

/// Well-known artifact root created under the invoking process's working
/// directory when none is given.
pub const DEFAULT_ROOT: &str = "__target__";

/// Explicit build context for the compilation pipeline.
///
/// Layout under the root, one subdirectory per module:
///
/// ```text
/// __target__/
/// └── calculator/
///     ├── calculator.js         # compiler output (plus its runtime files)
///     ├── calculator_index.js   # synthesized entry point
///     └── calculator.hash       # fingerprint record
/// ```
///
/// Keeping each module in its own subdirectory makes directory replacement
/// per-module: recompiling or failing to compile one module can never disturb
/// another's artifacts.
#[derive(Debug, Clone)]
pub struct BuildContext {
    root: PathBuf,
    transpiler: Transpiler,
}

impl BuildContext {
    /// Context rooted at `./__target__` with the compiler found on PATH.
    pub fn new() -> Result<Self> {
        Ok(Self {
            root: env::current_dir()?.join(DEFAULT_ROOT),
            transpiler: Transpiler::detect()?,
        })
    }

    /// Context with an explicit root and compiler.
    pub fn with_root(root: impl Into<PathBuf>, transpiler: Transpiler) -> Self {
        Self {
            root: root.into(),
            transpiler,
        }
    }

    /// The artifact root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configured external compiler.
    pub fn transpiler(&self) -> &Transpiler {
        &self.transpiler
    }

    /// Artifact directory for one module.
    pub fn artifact_dir(&self, module: &str) -> PathBuf {
        self.root.join(module)
    }

    /// Entry-point script path for one module.
    pub fn entry_point(&self, module: &str) -> PathBuf {
        self.artifact_dir(module).join(format!("{module}_index.js"))
    }

    /// Fingerprint record path for one module.
    pub fn fingerprint_file(&self, module: &str) -> PathBuf {
        self.artifact_dir(module).join(format!("{module}.hash"))
    }

    /// Remove every compiled artifact under the root.
    pub fn clean(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_per_module_paths() {
        let ctx = BuildContext::with_root("/build", Transpiler::with_command("tc"));

        assert_eq!(ctx.artifact_dir("calculator"), Path::new("/build/calculator"));
        assert_eq!(
            ctx.entry_point("calculator"),
            Path::new("/build/calculator/calculator_index.js")
        );
        assert_eq!(
            ctx.fingerprint_file("calculator"),
            Path::new("/build/calculator/calculator.hash")
        );
    }

    #[test]
    fn test_clean_removes_root() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join(DEFAULT_ROOT);
        fs::create_dir_all(root.join("calculator")).expect("Failed to create artifact dir");

        let ctx = BuildContext::with_root(&root, Transpiler::with_command("tc"));
        ctx.clean().expect("Failed to clean");
        assert!(!root.exists());

        // Cleaning an absent root is not an error.
        ctx.clean().expect("Clean must be idempotent");
    }
}
