//! External tools the build needs on the host.

/// An executable that must answer `--version` before a build starts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequiredTool {
    program: String,
    description: String,
}

impl RequiredTool {
    /// Creates a requirement on `program`, reported as `description` when missing.
    pub fn new(program: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: description.into(),
        }
    }

    /// Executable name looked up on `PATH`.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Requirement shown to the user.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The tools the CMake build of urdfdom_headers depends on.
    ///
    /// `make` is never invoked directly (CMake drives the native build), but
    /// the check is kept so a host without a native build driver fails before
    /// configuring.
    pub fn defaults() -> Vec<RequiredTool> {
        vec![
            RequiredTool::new("cmake", "CMake >= 3.10"),
            RequiredTool::new("make", "Make/Ninja"),
        ]
    }
}
