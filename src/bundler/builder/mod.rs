//! Build orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator and the pipeline stages
//! it sequences.
//!
//! # Overview
//!
//! The bundler:
//! 1. Verifies the required external tools answer `--version`
//! 2. Configures the CMake project into the build directory
//! 3. Builds the `install` target into the install directory
//! 4. Replaces `include/` and `lib/` under the package prefix with copies of
//!    the install tree
//! 5. Returns a [`StagedArtifact`] with a checksum for each staged subtree
//!
//! Each stage is also exported on its own so it can be driven, or tested
//! against a fake [`CommandRunner`](crate::bundler::CommandRunner), in
//! isolation.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for staged trees
//! - [`cmake`] - Configure and build/install invocations
//! - [`orchestrator`] - Main [`Bundler`] struct
//! - [`staging`] - Replace-copy of the install tree into the package layout
//! - [`tool_detection`] - External tool availability checking

mod checksum;
mod cmake;
mod orchestrator;
mod staging;
mod tool_detection;

pub use checksum::calculate_directory_sha256;
pub use cmake::{BUILD_JOBS, build_command, configure_and_build, configure_command};
pub use orchestrator::Bundler;
pub use staging::{STAGED_SUBDIRS, StagedArtifact, copy_artifacts};
pub use tool_detection::check_dependencies;
