use std::fmt::Debug;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: "".to_owned(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Converts a non-zero exit into [`Error::CommandFailed`].
    pub fn check(self, program: &str, args: &[&str]) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        let output = if self.stderr.trim().is_empty() {
            self.stdout.trim().to_owned()
        } else {
            self.stderr.trim().to_owned()
        };
        Err(Error::CommandFailed {
            command: command_line(program, args),
            exit_code: self.exit_code,
            output,
        })
    }
}

pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Synchronous access to the host's native tools.
///
/// Implementations block until the command exits. No timeout is applied.
pub trait CommandRunner: Debug + Send + Sync {
    fn run_with_output(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        self.run_with_output(program, args)?.check(program, args)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_with_output(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!("Running {}", command_line(program, args));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| Error::CommandSpawn {
                command: command_line(program, args),
                source,
            })?;

        let output = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(exit_code = ?output.exit_code, "Finished {}", command_line(program, args));
        Ok(output)
    }
}

#[cfg(test)]
#[path = "./process_test.rs"]
mod process_test;
