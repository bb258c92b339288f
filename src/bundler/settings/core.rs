//! Core BuildConfiguration struct and implementations.

use super::BuildType;
use std::path::{Path, PathBuf};

/// Directory name for the CMake build tree, relative to the source directory.
pub const DEFAULT_BUILD_DIR: &str = "cmake_build";

/// Directory name for the CMake install prefix, relative to the source directory.
pub const DEFAULT_INSTALL_DIR: &str = "urdfdom_headers_install";

/// Package root, relative to the source directory.
pub const DEFAULT_PACKAGE_ROOT: &str = "build/lib";

/// Prefix directory inside the package root that receives `include/` and `lib/`.
pub const DEFAULT_PREFIX: &str = "cmeel.prefix";

/// Configuration for one build-and-stage run.
///
/// Constructed via [`BuildConfigurationBuilder`](super::BuildConfigurationBuilder)
/// and immutable afterwards.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use urdfdom_headers_bundle::bundler::{BuildConfigurationBuilder, BuildType};
///
/// # fn example() -> urdfdom_headers_bundle::bundler::Result<()> {
/// let config = BuildConfigurationBuilder::new()
///     .source_dir("/src/urdfdom_headers")
///     .build_type(BuildType::Debug)
///     .build()?;
///
/// assert_eq!(config.build_dir(), Path::new("/src/urdfdom_headers/cmake_build"));
/// assert_eq!(
///     config.dest_prefix(),
///     Path::new("/src/urdfdom_headers/build/lib/cmeel.prefix"),
/// );
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildConfiguration {
    build_type: BuildType,

    /// Directory containing the top-level `CMakeLists.txt`.
    source_dir: PathBuf,

    /// CMake binary directory.
    build_dir: PathBuf,

    /// `CMAKE_INSTALL_PREFIX` for the external install step.
    install_dir: PathBuf,

    /// Root of the distributable package tree.
    package_root: PathBuf,

    /// Directory name under `package_root` that holds the staged tree.
    prefix: String,
}

impl BuildConfiguration {
    /// Returns the CMake build type.
    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    /// Returns the CMake source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the CMake build directory.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the install prefix the external project installs into.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Returns the package root.
    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    /// Returns the prefix directory name.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `<package_root>/<prefix>`, the staging destination.
    pub fn dest_prefix(&self) -> PathBuf {
        self.package_root.join(&self.prefix)
    }

    /// Creates a new BuildConfiguration (used by BuildConfigurationBuilder).
    pub(super) fn new(
        build_type: BuildType,
        source_dir: PathBuf,
        build_dir: PathBuf,
        install_dir: PathBuf,
        package_root: PathBuf,
        prefix: String,
    ) -> Self {
        Self {
            build_type,
            source_dir,
            build_dir,
            install_dir,
            package_root,
            prefix,
        }
    }
}
