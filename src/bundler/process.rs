//! External tool invocation.
//!
//! Stages build a [`ToolCommand`] as plain data and hand it to a
//! [`CommandRunner`]. The production runner spawns the program with tokio and
//! waits for it to exit; tests substitute a runner that records commands.

use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::path::{Path, PathBuf};

/// A program and its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Creates a command with no arguments.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as lossy UTF-8, for logging and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Value following `flag`, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }

    /// Renders the command as a single shell-like line.
    pub fn display_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.args_lossy() {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(&arg);
                line.push('"');
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

/// Outcome of a finished tool invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// stdout followed by stderr.
    pub output: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs tool commands to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` and waits for it to exit.
    ///
    /// An `Err` means the process could not be started; a non-zero exit is
    /// reported through [`ToolOutput::code`].
    fn run(&self, command: &ToolCommand)
    -> impl Future<Output = std::io::Result<ToolOutput>> + Send;
}

/// Spawns real processes via `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand) -> std::io::Result<ToolOutput> {
        let program = super::builder::resolve_tool(command.program());
        log::debug!("Running: {}", command.display_line());

        let output = tokio::process::Command::new(&program)
            .args(command.get_args())
            .output()
            .await?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        log::debug!(
            "{} exited with {:?}",
            program.display(),
            output.status.code()
        );

        Ok(ToolOutput {
            code: output.status.code(),
            output: combined,
        })
    }
}
