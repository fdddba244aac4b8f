use std::fs;
use std::path::{Path, PathBuf};

/// Read-only view of the host used by detection probes.
pub trait Environment {
    fn path_exists(&self, path: &Path) -> bool;
    fn which(&self, program: &str) -> Option<PathBuf>;
    fn read_to_string(&self, path: &Path) -> Option<String>;
    fn read_link(&self, path: &Path) -> Option<PathBuf>;
    fn var(&self, key: &str) -> Option<String>;
    fn parent_pid(&self) -> u32;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        fs::read_link(path).ok()
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn parent_pid(&self) -> u32 {
        std::os::unix::process::parent_id()
    }
}
