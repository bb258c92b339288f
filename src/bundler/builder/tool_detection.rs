//! External tool detection and availability checking.
//!
//! Every required tool is probed with `--version` before anything is built,
//! and all misses are reported together.

use crate::bundler::{
    error::{MissingTool, MissingToolError},
    runner::{CommandRunner, ToolCommand},
    settings::RequiredTool,
};

/// Verifies that every tool in `tools` answers a version query.
///
/// A tool is missing when it cannot be resolved or spawned, or when its
/// version query exits non-zero. The check never stops at the first miss.
pub async fn check_dependencies<R: CommandRunner>(
    runner: &R,
    tools: &[RequiredTool],
) -> Result<(), MissingToolError> {
    let mut missing = Vec::new();

    for tool in tools {
        let probe = ToolCommand::new(tool.program()).arg("--version");
        match runner.run(&probe).await {
            Ok(output) if output.success() => {
                let version = output.stdout.lines().next().unwrap_or_default();
                log::info!("✓ {} available: {}", tool.program(), version.trim());
            }
            Ok(output) => {
                log::warn!(
                    "{} found but --version check failed (exit code: {:?}). Stderr: {}",
                    tool.program(),
                    output.exit_code,
                    output.stderr.trim()
                );
                missing.push(missing_tool(tool));
            }
            Err(e) => {
                log::debug!("{} unavailable: {}", tool.program(), e);
                missing.push(missing_tool(tool));
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingToolError { missing })
    }
}

fn missing_tool(tool: &RequiredTool) -> MissingTool {
    MissingTool {
        program: tool.program().to_string(),
        description: tool.description().to_string(),
    }
}
