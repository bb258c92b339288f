//! Builder for constructing BuildConfiguration.

use super::{
    BuildConfiguration, BuildType, DEFAULT_BUILD_DIR, DEFAULT_INSTALL_DIR, DEFAULT_PACKAGE_ROOT,
    DEFAULT_PREFIX,
};
use crate::bundler::error::{Error, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`BuildConfiguration`].
///
/// Every directory not set explicitly is derived from the source directory,
/// which itself defaults to the current directory (`.`). All paths are made
/// absolute against the current directory, since CMake runs inside the build
/// directory.
///
/// # See Also
///
/// - [`BuildConfiguration`] - The built configuration
#[derive(Default)]
pub struct BuildConfigurationBuilder {
    build_type: BuildType,
    source_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    install_dir: Option<PathBuf>,
    package_root: Option<PathBuf>,
    prefix: Option<String>,
}

impl BuildConfigurationBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the build type.
    ///
    /// Default: [`BuildType::Release`]
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Sets the directory holding the top-level `CMakeLists.txt`.
    ///
    /// Default: `.`
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the CMake build directory.
    ///
    /// Default: `<source_dir>/cmake_build`
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the CMake install prefix.
    ///
    /// Default: `<source_dir>/urdfdom_headers_install`
    pub fn install_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.install_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the package root.
    ///
    /// Default: `<source_dir>/build/lib`
    pub fn package_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.package_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the prefix directory name under the package root.
    ///
    /// Default: `cmeel.prefix`
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or the
    /// prefix is not a single path component.
    pub fn build(self) -> Result<BuildConfiguration> {
        let source_dir = absolute(&self.source_dir.unwrap_or_else(|| PathBuf::from(".")))?;
        let build_dir = match self.build_dir {
            Some(dir) => absolute(&dir)?,
            None => source_dir.join(DEFAULT_BUILD_DIR),
        };
        let install_dir = match self.install_dir {
            Some(dir) => absolute(&dir)?,
            None => source_dir.join(DEFAULT_INSTALL_DIR),
        };
        let package_root = match self.package_root {
            Some(dir) => absolute(&dir)?,
            None => source_dir.join(DEFAULT_PACKAGE_ROOT),
        };

        let prefix = self.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let mut components = Path::new(&prefix).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(std::path::Component::Normal(_)), None)
        ) {
            crate::bail!("Invalid prefix {prefix:?}: expected a single directory name");
        }

        Ok(BuildConfiguration::new(
            self.build_type,
            source_dir,
            build_dir,
            install_dir,
            package_root,
            prefix,
        ))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(|e| Error::GenericError(format!("Cannot resolve {}: {}", path.display(), e)))
}
