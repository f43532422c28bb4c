//! Subprocess execution for the post-copy convenience steps
//!
//! git and npm run with the project directory as their working directory.
//! Output is captured rather than streamed so the spinner stays intact;
//! verbose mode inherits the parent's stdio instead.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code
    pub exit_code: i32,

    /// Captured standard error (empty when stdio was inherited)
    pub stderr: String,
}

impl CommandResult {
    fn from_status(status: ExitStatus, stderr: String) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code().unwrap_or(-1),
            stderr,
        }
    }
}

/// Run a command in `cwd`, capturing output unless `inherit_io` is set
pub fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
    inherit_io: bool,
) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);

    if inherit_io {
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute {}", program))?;
        Ok(CommandResult::from_status(status, String::new()))
    } else {
        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute {}", program))?;
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        Ok(CommandResult::from_status(output.status, stderr))
    }
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}
