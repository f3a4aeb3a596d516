//! External source-to-source compiler invocation.
//!
//! The compiler is an external collaborator with a narrow contract: invoked
//! with a `-b` build flag and a source file path, it writes a `__target__`
//! directory of browser-loadable output next to the source as a side effect.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Name of the directory the external compiler writes its output to.
pub const TARGET_DIR_NAME: &str = "__target__";

/// Default compiler command looked up on PATH.
pub const DEFAULT_COMMAND: &str = "transcrypt";

/// Handle to the external compiler.
#[derive(Debug, Clone)]
pub struct Transpiler {
    command: PathBuf,
    extra_args: Vec<String>,
}

impl Transpiler {
    /// Locate the default compiler on PATH.
    pub fn detect() -> Result<Self> {
        let command = which::which(DEFAULT_COMMAND)
            .map_err(|_| Error::TranspilerNotFound(DEFAULT_COMMAND.to_string()))?;
        Ok(Self {
            command,
            extra_args: Vec::new(),
        })
    }

    /// Use an explicit compiler command instead of PATH lookup.
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append arguments passed to the compiler before the build flag.
    pub fn extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The configured compiler command.
    pub fn command(&self) -> &Path {
        &self.command
    }

    /// Build `source_file`, returning the produced output directory.
    ///
    /// Blocks until the subprocess exits; no timeout is enforced, so a hang
    /// in the external tool hangs the caller. The subprocess inherits the
    /// current environment. On non-zero exit the captured stdout/stderr are
    /// surfaced in the error and nothing else is touched.
    pub fn build(&self, module: &str, source_file: &Path) -> Result<PathBuf> {
        tracing::debug!(
            command = %self.command.display(),
            file = %source_file.display(),
            "invoking transpiler"
        );
        let output = Command::new(&self.command)
            .args(&self.extra_args)
            .arg("-b")
            .arg(source_file)
            .output()
            .map_err(|e| Error::Compilation {
                module: module.to_string(),
                output: format!("failed to run {}: {e}", self.command.display()),
            })?;

        if !output.status.success() {
            return Err(Error::Compilation {
                module: module.to_string(),
                output: captured_output(&output.stdout, &output.stderr),
            });
        }

        let target = source_file
            .parent()
            .unwrap_or(Path::new("."))
            .join(TARGET_DIR_NAME);
        if !target.is_dir() {
            return Err(Error::MissingOutput(target));
        }
        Ok(target)
    }
}

impl Default for Transpiler {
    /// The default command name as-is, resolved against PATH at spawn time.
    /// [`Transpiler::detect`] is for callers that want the lookup to fail
    /// early with a dedicated error.
    fn default() -> Self {
        Self::with_command(DEFAULT_COMMAND)
    }
}

fn captured_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.trim().is_empty() {
        if !text.trim().is_empty() {
            text.push('\n');
        }
        text.push_str(&err);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_command_keeps_args() {
        let t = Transpiler::with_command("my-compiler").extra_args(["--nomin"]);
        assert_eq!(t.command(), Path::new("my-compiler"));
        assert_eq!(t.extra_args, ["--nomin"]);
    }

    #[test]
    fn test_captured_output_combines_streams() {
        assert_eq!(captured_output(b"out", b"err"), "out\nerr");
        assert_eq!(captured_output(b"", b"err"), "err");
        assert_eq!(captured_output(b"out", b""), "out");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_a_compilation_error() {
        let t = Transpiler::with_command("false");
        let err = t
            .build("m", Path::new("/tmp/m.py"))
            .expect_err("false must fail the build");
        assert!(matches!(err, Error::Compilation { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_exit_without_output_dir() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let src = dir.path().join("m.py");
        std::fs::write(&src, "").expect("Failed to write source");

        // `true` exits zero but produces no __target__ directory.
        let t = Transpiler::with_command("true");
        let err = t.build("m", &src).expect_err("missing output must fail");
        assert!(matches!(err, Error::MissingOutput(_)));
    }

    #[test]
    fn test_missing_command_is_a_compilation_error() {
        let t = Transpiler::with_command("/nonexistent/transom-compiler");
        let err = t
            .build("m", Path::new("m.py"))
            .expect_err("missing command must fail");
        assert!(matches!(err, Error::Compilation { .. }));
    }
}
