//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap and converts the
//! parsed arguments into a [`BuildConfiguration`].

use crate::bundler::{BuildConfiguration, BuildConfigurationBuilder, BuildType};
use crate::error::{BundlerError, CliError};
use clap::Parser;
use std::path::PathBuf;

/// Builds urdfdom_headers with CMake and stages it into a package layout
#[derive(Parser, Debug)]
#[command(
    name = "urdfdom_headers_bundle",
    version,
    about = "Builds urdfdom_headers with CMake and stages it into a package layout",
    long_about = "Configures, builds and installs the urdfdom_headers CMake project, then \
copies the installed include/ and lib/ trees into <package-root>/<prefix>.

Usage:
  urdfdom_headers_bundle
  urdfdom_headers_bundle --build-type Debug
  urdfdom_headers_bundle --source-dir ./urdfdom_headers --package-root dist/lib

Exit code 0 = include/ and lib/ staged under the package prefix."
)]
pub struct Args {
    /// CMake build type
    #[arg(long, value_enum, ignore_case = true, default_value_t = BuildType::Release)]
    pub build_type: BuildType,

    /// Directory containing the top-level CMakeLists.txt
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// CMake build directory [default: <source-dir>/cmake_build]
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// CMake install prefix [default: <source-dir>/urdfdom_headers_install]
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Root of the package tree [default: <source-dir>/build/lib]
    #[arg(long, value_name = "DIR")]
    pub package_root: Option<PathBuf>,

    /// Directory under the package root that receives include/ and lib/
    #[arg(long, value_name = "NAME", default_value = crate::bundler::settings::DEFAULT_PREFIX)]
    pub prefix: String,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.is_empty() {
            return Err("Prefix cannot be empty".to_string());
        }

        if let (Some(build), Some(install)) = (&self.build_dir, &self.install_dir) {
            if build == install {
                return Err(format!(
                    "Build and install directories must differ: {}",
                    build.display()
                ));
            }
        }

        Ok(())
    }

    /// Builds the immutable configuration for this run.
    pub fn to_config(&self) -> Result<BuildConfiguration, BundlerError> {
        self.validate()
            .map_err(|reason| CliError::InvalidArguments { reason })?;

        let mut builder = BuildConfigurationBuilder::new()
            .build_type(self.build_type)
            .source_dir(&self.source_dir)
            .prefix(self.prefix.clone());
        if let Some(dir) = &self.build_dir {
            builder = builder.build_dir(dir);
        }
        if let Some(dir) = &self.install_dir {
            builder = builder.install_dir(dir);
        }
        if let Some(dir) = &self.package_root {
            builder = builder.package_root(dir);
        }

        Ok(builder.build()?)
    }
}
