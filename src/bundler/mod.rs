//! Build and staging pipeline.
//!
//! Drives the external CMake build of urdfdom_headers and stages the
//! installed headers and libraries into the package layout.

pub mod builder;
pub mod error;
pub mod runner;
pub mod settings;
pub mod utils;

pub use builder::{
    Bundler, StagedArtifact, check_dependencies, configure_and_build, copy_artifacts,
};
pub use error::{BuildError, CopyError, Error, MissingTool, MissingToolError, Result, StageFailure};
pub use runner::{CommandOutput, CommandRunner, SystemRunner, ToolCommand};
pub use settings::{BuildConfiguration, BuildConfigurationBuilder, BuildType, RequiredTool};
