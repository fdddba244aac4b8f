use std::fmt;
use std::io;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError<E: fmt::Debug> {
    /// Error returned by the interface's `start` or `stop`, unchanged.
    #[error("Error executing service: {0:?}")]
    ExecutionFailure(E),
    #[error("Unable to register termination handlers: {0}")]
    InitializationFailure(#[source] io::Error),
}

impl<E: fmt::Debug> ServiceError<E> {
    /// The interface error, if that is what failed.
    pub fn execution_error(&self) -> Option<&E> {
        match self {
            ServiceError::ExecutionFailure(e) => Some(e),
            ServiceError::InitializationFailure(_) => None,
        }
    }
}
