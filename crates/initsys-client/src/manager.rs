use std::fmt::{self, Debug};
use std::path::PathBuf;

use initsys_core::process::{CommandOutput, CommandRunner, command_line};
use initsys_core::{Result, ServiceDescriptor, Status};

use crate::BackendKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new<S: Into<String>>(program: impl Into<String>, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }

    pub fn run_with_output(&self, runner: &dyn CommandRunner) -> Result<CommandOutput> {
        runner.run_with_output(&self.program, &self.arg_refs())
    }

    /// Runs the command, failing on a non-zero exit.
    pub fn run(&self, runner: &dyn CommandRunner) -> Result<()> {
        runner.run(&self.program, &self.arg_refs())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&command_line(&self.program, &self.arg_refs()))
    }
}

/// Lifecycle operations for one service on one init system.
///
/// Implementations are not synchronized: callers must not run operations concurrently
/// against the same service.
pub trait Manager: Debug + Send + Sync {
    fn kind(&self) -> BackendKind;
    fn descriptor(&self) -> &ServiceDescriptor;
    /// Location of the persisted artifact. Its existence means "installed".
    fn config_path(&self) -> Result<PathBuf>;
    fn install(&self) -> Result<()>;
    fn uninstall(&self) -> Result<()>;
    fn start(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    fn restart(&self) -> Result<()>;
    /// Returns [`initsys_core::Error::NotInstalled`] when nothing is registered.
    fn status(&self) -> Result<Status>;
    fn status_command(&self) -> Command;

    fn name(&self) -> &str {
        self.descriptor().name()
    }

    fn display_name(&self) -> &str {
        self.descriptor().display()
    }

    fn platform(&self) -> String {
        self.kind().to_string()
    }
}
