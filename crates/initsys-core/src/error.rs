use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum TemplateErrorKind {
    #[strum(serialize = "syntax error")]
    Syntax,
    #[strum(serialize = "missing field")]
    MissingField,
    #[strum(serialize = "render error")]
    Render,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Error rendering template ({kind}): {message}")]
pub struct TemplateError {
    pub kind: TemplateErrorKind,
    pub message: String,
}

impl TemplateError {
    pub fn new(kind: TemplateErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The service is not installed")]
    NotInstalled,
    #[error("The service is already installed: {0:?}")]
    AlreadyInstalled(PathBuf),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    #[error("Command \"{command}\" exited with code {exit_code:?}: {output}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },
    #[error("Error running command \"{command}\": {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Error {action} {path:?}: {source}")]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Template(#[from] TemplateError),
    #[error("The service is in a failed state: {0}")]
    ServiceFailed(String),
    #[error("No supported init system was detected on this host")]
    NoBackend,
    #[error("The user's home directory could not be located")]
    NoHomeDir,
}

impl Error {
    /// Builds a `map_err` adapter for a failed filesystem call on `path`.
    pub fn filesystem(action: &'static str, path: impl AsRef<Path>) -> impl FnOnce(io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        move |source| Error::Filesystem {
            action,
            path,
            source,
        }
    }

    pub fn is_not_installed(&self) -> bool {
        matches!(self, Error::NotInstalled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
