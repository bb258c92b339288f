//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the pipeline
//! stages in order: dependency check, CMake configure/build/install, and
//! staging of the install tree.

use crate::bundler::{
    Result,
    runner::{CommandRunner, SystemRunner},
    settings::{BuildConfiguration, RequiredTool},
};

use super::{
    cmake::configure_and_build,
    staging::{StagedArtifact, copy_artifacts},
    tool_detection::check_dependencies,
};

/// Main bundler orchestrator.
///
/// Holds the immutable configuration and the command runner. Each stage is a
/// free function; the orchestrator only sequences them and stops at the
/// first failure.
///
/// # Examples
///
/// ```no_run
/// use urdfdom_headers_bundle::bundler::{BuildConfigurationBuilder, BuildType, Bundler};
///
/// # async fn example() -> urdfdom_headers_bundle::bundler::Result<()> {
/// let config = BuildConfigurationBuilder::new()
///     .source_dir(".")
///     .build_type(BuildType::Release)
///     .build()?;
///
/// let artifacts = Bundler::new(config).run().await?;
///
/// for artifact in artifacts {
///     println!("Staged: {} ({} files)", artifact.path.display(), artifact.file_count);
///     println!("SHA256: {}", artifact.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R = SystemRunner> {
    config: BuildConfiguration,
    tools: Vec<RequiredTool>,
    runner: R,
}

impl Bundler<SystemRunner> {
    /// Creates a bundler that runs tools on the host.
    pub fn new(config: BuildConfiguration) -> Self {
        Self::with_runner(config, SystemRunner::new())
    }
}

impl<R: CommandRunner> Bundler<R> {
    /// Creates a bundler that runs every external command through `runner`.
    pub fn with_runner(config: BuildConfiguration, runner: R) -> Self {
        Self {
            config,
            tools: RequiredTool::defaults(),
            runner,
        }
    }

    /// Replaces the set of tools verified before building.
    ///
    /// Default: [`RequiredTool::defaults()`]
    pub fn required_tools(mut self, tools: Vec<RequiredTool>) -> Self {
        self.tools = tools;
        self
    }

    /// Returns a reference to the build configuration.
    pub fn config(&self) -> &BuildConfiguration {
        &self.config
    }

    /// Returns the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs the full pipeline and returns the staged subtrees.
    ///
    /// # Errors
    ///
    /// The first failing stage aborts the run:
    /// - [`Error::MissingTools`](crate::bundler::Error::MissingTools) before any build command
    /// - [`Error::Build`](crate::bundler::Error::Build) from configure or build/install
    /// - [`Error::Copy`](crate::bundler::Error::Copy) while staging
    pub async fn run(&self) -> Result<Vec<StagedArtifact>> {
        log::info!("Checking build dependencies...");
        check_dependencies(&self.runner, &self.tools).await?;

        configure_and_build(&self.runner, &self.config).await?;

        let dest_prefix = self.config.dest_prefix();
        let artifacts = copy_artifacts(self.config.install_dir(), &dest_prefix).await?;

        for artifact in &artifacts {
            log::info!(
                "✓ Staged {} ({} files, sha256 {})",
                artifact.path.display(),
                artifact.file_count,
                artifact.checksum
            );
        }

        Ok(artifacts)
    }
}
