//! Command line interface for the urdfdom_headers bundler.
//!
//! Parses arguments, builds the configuration and runs the pipeline on the
//! host.

mod args;

pub use args::Args;

use crate::bundler::Bundler;
use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with_args(&args).await
}

/// Runs the pipeline for already-parsed arguments.
pub async fn run_with_args(args: &Args) -> Result<i32> {
    let config = args.to_config()?;
    log::debug!("Build configuration: {:?}", config);

    let artifacts = Bundler::new(config).run().await?;
    for artifact in &artifacts {
        println!("Staged {} ({} files)", artifact.path.display(), artifact.file_count);
    }

    Ok(0)
}
