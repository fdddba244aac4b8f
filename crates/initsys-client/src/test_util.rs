use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use initsys_core::Result;
use initsys_core::process::{CommandOutput, CommandRunner, command_line};

use crate::Environment;

#[derive(Default)]
pub(crate) struct FakeEnvironment {
    pub(crate) paths: HashSet<PathBuf>,
    pub(crate) programs: HashSet<String>,
    pub(crate) files: HashMap<PathBuf, String>,
    pub(crate) links: HashMap<PathBuf, PathBuf>,
    pub(crate) vars: HashMap<String, String>,
    pub(crate) ppid: u32,
}

impl FakeEnvironment {
    pub(crate) fn new() -> Self {
        Self {
            ppid: 4242,
            ..Default::default()
        }
    }

    pub(crate) fn with_path(mut self, path: &str) -> Self {
        self.paths.insert(path.into());
        self
    }

    pub(crate) fn with_program(mut self, program: &str) -> Self {
        self.programs.insert(program.to_owned());
        self
    }

    pub(crate) fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.into(), contents.to_owned());
        self
    }

    pub(crate) fn with_link(mut self, path: &str, target: &str) -> Self {
        self.links.insert(path.into(), target.into());
        self
    }

    pub(crate) fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }

    pub(crate) fn with_ppid(mut self, ppid: u32) -> Self {
        self.ppid = ppid;
        self
    }
}

impl Environment for FakeEnvironment {
    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path) || self.files.contains_key(path)
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.programs
            .contains(program)
            .then(|| Path::new("/usr/bin").join(program))
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        self.links.get(path).cloned()
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn parent_pid(&self) -> u32 {
        self.ppid
    }
}

/// Answers every command with canned output and records what was run.
///
/// Clones share state, so a test can keep one handle and give another to a [`crate::Host`].
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedRunner {
    responses: Arc<Mutex<HashMap<String, CommandOutput>>>,
    calls: Arc<Mutex<Vec<(String, Instant)>>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_response(&self, command: &str, exit_code: i32, stdout: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_owned(), CommandOutput::new(exit_code, stdout));
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    pub(crate) fn timed_calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl CommandRunner for ScriptedRunner {
    fn run_with_output(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        self.calls
            .lock()
            .unwrap()
            .push((command.clone(), Instant::now()));
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&command)
            .cloned()
            .unwrap_or_else(|| CommandOutput::new(0, "")))
    }
}
