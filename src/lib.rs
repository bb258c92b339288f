//! Build-and-stage packaging for the urdfdom_headers C++ header library.
//!
//! This library drives the project's CMake build and copies the installed
//! `include/` and `lib/` trees into a distributable package layout:
//! - dependency check for the external tools
//! - CMake configure, build and install
//! - atomic replace-copy into `<package_root>/<prefix>`
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
