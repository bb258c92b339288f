//! Top-level error types for the command line tool.
//!
//! Pipeline failures arrive as [`crate::bundler::Error`]; argument problems
//! are reported as [`CliError`].

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Pipeline errors (already name the failing stage)
    #[error(transparent)]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Short name of the pipeline stage that failed, for diagnostics.
    pub fn stage(&self) -> &'static str {
        use crate::bundler::{BuildError, Error};

        match self {
            BundlerError::Cli(_) => "arguments",
            BundlerError::Bundler(Error::MissingTools(_)) => "dependency check",
            BundlerError::Bundler(Error::Build(BuildError::Directory { .. })) => "prepare directories",
            BundlerError::Bundler(Error::Build(BuildError::Configure(_))) => "configure",
            BundlerError::Bundler(Error::Build(BuildError::Compile(_))) => "build/install",
            BundlerError::Bundler(Error::Copy(_)) => "staging",
            BundlerError::Bundler(Error::GenericError(_)) => "configuration",
        }
    }
}
