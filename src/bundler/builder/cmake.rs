//! CMake configure, build and install.
//!
//! Runs the generator once against the source directory, then drives the
//! native build and the `install` target through `cmake --build`, both from
//! inside the build directory.

use crate::bundler::{
    error::{BuildError, StageFailure},
    runner::{CommandOutput, CommandRunner, ToolCommand},
    settings::BuildConfiguration,
};
use std::path::Path;

/// Parallel jobs requested from the native build tool.
pub const BUILD_JOBS: u32 = 2;

/// Generator invocation for `config`.
pub fn configure_command(config: &BuildConfiguration) -> ToolCommand {
    ToolCommand::new("cmake")
        .arg(path_arg(config.source_dir()))
        .arg(format!(
            "-DCMAKE_INSTALL_PREFIX={}",
            path_arg(config.install_dir())
        ))
        .arg(format!("-DCMAKE_BUILD_TYPE={}", config.build_type()))
        .current_dir(config.build_dir())
        .stream_output(true)
}

/// Build+install invocation for `config`.
pub fn build_command(config: &BuildConfiguration) -> ToolCommand {
    ToolCommand::new("cmake")
        .args(["--build", ".", "--target", "install", "--config"])
        .arg(config.build_type().as_str())
        .arg(format!("-j{BUILD_JOBS}"))
        .current_dir(config.build_dir())
        .stream_output(true)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Configures, builds and installs the external project described by `config`.
///
/// On success `config.install_dir()` holds the install tree.
pub async fn configure_and_build<R: CommandRunner>(
    runner: &R,
    config: &BuildConfiguration,
) -> Result<(), BuildError> {
    for dir in [config.build_dir(), config.install_dir()] {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| BuildError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
    }

    log::info!(
        "Configuring {} ({})",
        config.source_dir().display(),
        config.build_type()
    );
    let configure = configure_command(config);
    run_stage(runner, &configure)
        .await
        .map_err(BuildError::Configure)?;

    log::info!("Building and installing to {}", config.install_dir().display());
    let build = build_command(config);
    run_stage(runner, &build).await.map_err(BuildError::Compile)?;

    Ok(())
}

async fn run_stage<R: CommandRunner>(
    runner: &R,
    command: &ToolCommand,
) -> Result<CommandOutput, StageFailure> {
    match runner.run(command).await {
        Ok(output) if output.success() => Ok(output),
        Ok(output) => Err(StageFailure {
            command: command.to_string(),
            exit_code: output.exit_code,
            output: output.stderr,
        }),
        Err(e) => Err(StageFailure {
            command: command.to_string(),
            exit_code: None,
            output: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        runner::fake::{ScriptedRunner, exit, fail_with},
        settings::{BuildConfigurationBuilder, BuildType},
    };

    fn config(root: &Path, build_type: BuildType) -> BuildConfiguration {
        BuildConfigurationBuilder::new()
            .source_dir(root)
            .build_type(build_type)
            .build()
            .unwrap()
    }

    #[test]
    fn configure_passes_prefix_and_build_type() {
        let cfg = config(Path::new("/src"), BuildType::Debug);
        let cmd = configure_command(&cfg);

        assert_eq!(
            cmd.get_args(),
            [
                "/src",
                "-DCMAKE_INSTALL_PREFIX=/src/urdfdom_headers_install",
                "-DCMAKE_BUILD_TYPE=Debug",
            ]
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/src/cmake_build")));
    }

    #[test]
    fn default_build_type_is_release() {
        let cfg = BuildConfigurationBuilder::new()
            .source_dir("/src")
            .build()
            .unwrap();
        assert!(
            configure_command(&cfg)
                .get_args()
                .contains(&"-DCMAKE_BUILD_TYPE=Release".to_string())
        );
    }

    #[test]
    fn build_targets_install_with_fixed_parallelism() {
        let cfg = config(Path::new("/src"), BuildType::Release);
        assert_eq!(
            build_command(&cfg).to_string(),
            "cmake --build . --target install --config Release -j2"
        );
    }

    #[tokio::test]
    async fn creates_directories_and_runs_both_steps() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path(), BuildType::Release);
        let runner = ScriptedRunner::new().on("cmake", |_| exit(0));

        configure_and_build(&runner, &cfg).await.unwrap();

        assert!(cfg.build_dir().is_dir());
        assert!(cfg.install_dir().is_dir());
        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], configure_command(&cfg));
        assert_eq!(calls[1], build_command(&cfg));
    }

    #[tokio::test]
    async fn configure_failure_stops_before_build() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path(), BuildType::Release);
        let runner = ScriptedRunner::new()
            .on_arg("cmake", "--build", |_| exit(0))
            .on("cmake", |_| fail_with(1, "CMake Error: CMakeLists.txt not found"));

        let err = configure_and_build(&runner, &cfg).await.unwrap_err();

        match err {
            BuildError::Configure(failure) => {
                assert_eq!(failure.exit_code, Some(1));
                assert!(failure.output.contains("CMakeLists.txt not found"));
            }
            other => panic!("expected configure error, got {other:?}"),
        }
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn build_failure_is_a_compile_error() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path(), BuildType::Release);
        let runner = ScriptedRunner::new()
            .on_arg("cmake", "--build", |_| fail_with(2, "make: *** [all] Error 2"))
            .on("cmake", |_| exit(0));

        let err = configure_and_build(&runner, &cfg).await.unwrap_err();

        assert!(matches!(err, BuildError::Compile(ref f) if f.exit_code == Some(2)));
        assert!(err.to_string().contains("Error 2"));
    }

    #[tokio::test]
    async fn spawn_failure_is_reported_as_configure_error() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = config(tmp.path(), BuildType::Release);

        let err = configure_and_build(&ScriptedRunner::new(), &cfg)
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::Configure(ref f) if f.exit_code.is_none()));
        assert!(err.to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn blocked_directory_creation_is_a_directory_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where a parent directory should be
        std::fs::write(tmp.path().join("blocker"), "").unwrap();
        let cfg = BuildConfigurationBuilder::new()
            .source_dir(tmp.path())
            .build_dir(tmp.path().join("blocker/build"))
            .build()
            .unwrap();

        let runner = ScriptedRunner::new().on("cmake", |_| exit(0));
        let err = configure_and_build(&runner, &cfg).await.unwrap_err();

        assert!(matches!(err, BuildError::Directory { ref path, .. } if path.ends_with("blocker/build")));
        assert!(runner.calls().is_empty());
    }
}
