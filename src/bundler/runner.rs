//! External process execution.
//!
//! Pipeline stages never spawn processes themselves; they describe a
//! [`ToolCommand`] and hand it to a [`CommandRunner`]. [`SystemRunner`] runs
//! it on the host, tests substitute a scripted runner.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// A process invocation: program, arguments and working directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    stream_output: bool,
}

impl ToolCommand {
    /// Creates a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            stream_output: false,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Echo the tool's output live while it runs.
    pub fn stream_output(mut self, stream: bool) -> Self {
        self.stream_output = stream;
        self
    }

    /// Returns the program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments, in order.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Returns the working directory, if one was set.
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Returns true if output is echoed live.
    pub fn is_streamed(&self) -> bool {
        self.stream_output
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What a finished process left behind.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout (empty when streamed).
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true if the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external commands to completion.
///
/// `Err` means the program could not be resolved or spawned at all; a
/// process that ran and failed is reported through [`CommandOutput::exit_code`].
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs `command` and waits for it to exit.
    async fn run(&self, command: &ToolCommand) -> io::Result<CommandOutput>;
}

/// Runs commands on the host, resolving programs on `PATH`.
///
/// The child inherits this process's environment unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> io::Result<CommandOutput> {
        let path = which::which(command.program()).map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found in PATH: {}", command.program(), e),
            )
        })?;
        log::debug!("Resolved {} to {}", command.program(), path.display());
        log::debug!("Running: {}", command);

        let mut cmd = Command::new(&path);
        cmd.args(command.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = command.get_current_dir() {
            cmd.current_dir(dir);
        }

        if !command.is_streamed() {
            let output = cmd.output().await?;
            return Ok(CommandOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let mut child = cmd.spawn()?;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Both streams must be drained before waiting, or a full pipe blocks the child
        let (_, stderr) = tokio::join!(
            async {
                if let Some(stdout) = stdout {
                    drain_lines(stdout, "stdout", |line| println!("  {line}")).await;
                }
            },
            async {
                let mut captured = String::new();
                if let Some(stderr) = stderr {
                    drain_lines(stderr, "stderr", |line| {
                        eprintln!("  {line}");
                        captured.push_str(line);
                        captured.push('\n');
                    })
                    .await;
                }
                captured
            }
        );

        let status = child.wait().await?;

        Ok(CommandOutput {
            exit_code: status.code(),
            stdout: String::new(),
            stderr,
        })
    }
}

/// Reads `reader` to EOF, passing each line to `on_line` without its line ending.
///
/// Lines are decoded lossily so tool output in a non-UTF-8 encoding neither
/// stops the read nor closes the pipe under the child.
async fn drain_lines<R: AsyncRead + Unpin>(reader: R, stream: &str, mut on_line: impl FnMut(&str)) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                on_line(line.trim_end_matches(['\n', '\r']));
            }
            Err(e) => {
                log::warn!("Stopped reading child {}: {}", stream, e);
                break;
            }
        }
    }
}
