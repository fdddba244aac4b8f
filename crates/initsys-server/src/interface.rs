use std::fmt;

use initsys_client::Manager;

/// The service body driven by [`run`](crate::run).
///
/// `start` must return once the service is up. Long-running work belongs on threads the
/// implementation owns, torn down again in `stop`.
pub trait Interface {
    type Error: fmt::Debug;

    fn start(&mut self, manager: &dyn Manager) -> Result<(), Self::Error>;

    fn stop(&mut self, manager: &dyn Manager) -> Result<(), Self::Error>;
}
