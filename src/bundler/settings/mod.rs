//! Configuration structures for build and staging operations.
//!
//! This module provides the build type, the immutable per-run
//! [`BuildConfiguration`] with its builder, and the list of external tools a
//! build requires.

mod build_type;
mod builder;
mod core;
mod tools;

// Re-export all public types
pub use build_type::BuildType;
pub use builder::BuildConfigurationBuilder;
pub use self::core::{
    BuildConfiguration, DEFAULT_BUILD_DIR, DEFAULT_INSTALL_DIR, DEFAULT_PACKAGE_ROOT,
    DEFAULT_PREFIX,
};
pub use tools::RequiredTool;
