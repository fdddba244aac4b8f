use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
#[error("Error loading service file {0:#?}: {1}")]
pub struct ConfigLoadError(pub(crate) PathBuf, pub(crate) String);

impl ConfigLoadError {
    pub fn path(&self) -> &PathBuf {
        &self.0
    }
}
