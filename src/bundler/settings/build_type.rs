//! CMake build type selection.

use std::{fmt, str::FromStr};

/// CMake build type passed as `CMAKE_BUILD_TYPE` and `--config`.
///
/// Only the two configurations the package ships are accepted.
///
/// # Examples
///
/// ```
/// use urdfdom_headers_bundle::bundler::BuildType;
///
/// assert_eq!(BuildType::default(), BuildType::Release);
/// assert_eq!("debug".parse::<BuildType>(), Ok(BuildType::Debug));
/// assert_eq!(BuildType::Debug.to_string(), "Debug");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum BuildType {
    /// Optimized build
    #[default]
    #[value(name = "Release")]
    Release,
    /// Build with debug information
    #[value(name = "Debug")]
    Debug,
}

impl BuildType {
    /// Returns the CMake spelling of this build type.
    pub fn as_str(self) -> &'static str {
        match self {
            BuildType::Release => "Release",
            BuildType::Debug => "Debug",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("release") {
            Ok(BuildType::Release)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(BuildType::Debug)
        } else {
            Err(format!("Invalid build type: {s}. Valid build types: Release, Debug"))
        }
    }
}
