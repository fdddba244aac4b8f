use std::path::{Path, PathBuf};
use std::sync::Arc;

use initsys_core::process::{CommandRunner, SystemRunner};
use initsys_core::{Error, Result};

/// Where artifacts are written and how native tools are invoked.
///
/// [`Host::system`] targets the real filesystem root. Tests point `root` at a scratch
/// directory and swap in a scripted runner.
#[derive(Clone, Debug)]
pub struct Host {
    root: PathBuf,
    home: Option<PathBuf>,
    runner: Arc<dyn CommandRunner>,
}

impl Host {
    pub fn system() -> Self {
        Self {
            root: PathBuf::from("/"),
            home: directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
            runner: Arc::new(SystemRunner),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves an absolute system path such as `/etc/init.d/foo` against the root.
    pub fn path(&self, absolute: &str) -> PathBuf {
        self.root.join(absolute.trim_start_matches('/'))
    }

    pub fn home_dir(&self) -> Result<&Path> {
        self.home.as_deref().ok_or(Error::NoHomeDir)
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::system()
    }
}
