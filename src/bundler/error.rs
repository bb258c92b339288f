//! Error types for the build and staging pipeline.
//!
//! Each pipeline stage has its own error type so callers can match on the
//! stage that failed. [`Error`] gathers them for code that drives the whole
//! sequence.

use std::{
    fmt, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A required external tool, as reported in dependency errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTool {
    /// Executable name that was probed.
    pub program: String,
    /// Human-readable requirement, e.g. `CMake >= 3.10`.
    pub description: String,
}

/// One or more required external tools could not be used.
///
/// Always lists every missing tool, never only the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required tools: {}", list_descriptions(.missing))]
pub struct MissingToolError {
    /// Every tool whose version query failed.
    pub missing: Vec<MissingTool>,
}

fn list_descriptions(missing: &[MissingTool]) -> String {
    missing
        .iter()
        .map(|tool| tool.description.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Details of an external command that did not complete successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    /// Rendered command line.
    pub command: String,
    /// Exit code, `None` if the process never ran or was killed by a signal.
    pub exit_code: Option<i32>,
    /// Diagnostic output forwarded from the tool (stderr, or the spawn error).
    pub output: String,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.command)?;
        match self.exit_code {
            Some(code) => write!(f, " exited with code {code}")?,
            None => write!(f, " did not exit normally")?,
        }
        let output = self.output.trim();
        if !output.is_empty() {
            write!(f, "\n{output}")?;
        }
        Ok(())
    }
}

/// Failure while configuring, building or installing the external project.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A working directory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    Directory {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The generator step exited non-zero.
    #[error("CMake configure step failed: {0}")]
    Configure(StageFailure),

    /// The build+install step exited non-zero.
    #[error("CMake build/install step failed: {0}")]
    Compile(StageFailure),
}

/// Failure while staging the install tree into the package layout.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The install step did not produce an expected subtree.
    #[error("Staging failed: install tree is missing {}: expected a directory produced by the install step", .path.display())]
    MissingSource {
        /// Expected source subtree
        path: PathBuf,
    },

    /// A filesystem operation failed during delete/copy/rename.
    #[error("Staging failed while {operation} at {}: {source}", .path.display())]
    Filesystem {
        /// What was being done
        operation: String,
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Dependency check failed
    #[error(transparent)]
    MissingTools(#[from] MissingToolError),

    /// Configure/build/install failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Artifact staging failed
    #[error(transparent)]
    Copy(#[from] CopyError),

    /// Invalid configuration or other failure
    #[error("{0}")]
    GenericError(String),
}

/// Attaches an operation and a path to an I/O result.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`CopyError::Filesystem`] describing `operation` on `path`.
    fn fs_context(self, operation: &str, path: &Path) -> std::result::Result<T, CopyError>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, operation: &str, path: &Path) -> std::result::Result<T, CopyError> {
        self.map_err(|source| CopyError::Filesystem {
            operation: operation.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Early-returns an [`Error::GenericError`] formatted like `format!`.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)).into())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_message_lists_every_tool() {
        let err = MissingToolError {
            missing: vec![
                MissingTool {
                    program: "cmake".into(),
                    description: "CMake >= 3.10".into(),
                },
                MissingTool {
                    program: "make".into(),
                    description: "Make/Ninja".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Missing required tools: CMake >= 3.10, Make/Ninja"
        );
    }

    #[test]
    fn stage_failure_includes_exit_code_and_output() {
        let err = BuildError::Configure(StageFailure {
            command: "cmake /src".into(),
            exit_code: Some(1),
            output: "CMake Error: no CMakeLists.txt\n".into(),
        });
        let msg = err.to_string();
        assert!(msg.starts_with("CMake configure step failed: `cmake /src` exited with code 1"));
        assert!(msg.ends_with("CMake Error: no CMakeLists.txt"));
    }

    #[test]
    fn fs_context_names_operation_and_path() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res
            .fs_context("removing old tree", Path::new("/pkg/include"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Staging failed while removing old tree at /pkg/include: denied"
        );
    }

    #[test]
    fn missing_source_message_names_staging() {
        let err = CopyError::MissingSource {
            path: PathBuf::from("/install/include"),
        };
        assert!(err.to_string().starts_with("Staging failed: install tree is missing /install/include"));
    }
}
