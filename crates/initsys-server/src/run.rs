use std::ffi::c_int;

use initsys_client::{Manager, keys};
use tracing::{debug, info};

use crate::signal::TERMINATION_SIGNALS;
use crate::{Interface, ServiceError, TerminationSignals};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Idle,
    Started,
    AwaitingShutdown,
    Stopped,
}

fn enter(name: &str, state: RunState) {
    debug!(service = name, ?state, "Run state changed");
}

/// Starts `interface`, blocks until shutdown is requested, then stops it.
///
/// The wait is the `RunWait` option of the manager's descriptor when one is set, otherwise
/// a wait on SIGTERM or SIGINT whose handlers are registered before `start`. A registration
/// failure is returned before anything is started. The wait runs exactly once. A start
/// failure is returned as is and `stop` is never called. Otherwise the result of `stop` is
/// the result of the run.
pub fn run<I: Interface>(
    manager: &dyn Manager,
    interface: &mut I,
) -> Result<(), ServiceError<I::Error>> {
    run_until(manager, interface, TERMINATION_SIGNALS)
}

pub(crate) fn run_until<I: Interface>(
    manager: &dyn Manager,
    interface: &mut I,
    signals: &[c_int],
) -> Result<(), ServiceError<I::Error>> {
    let name = manager.name();
    enter(name, RunState::Idle);
    let options = manager.descriptor().options();
    let termination = match options.wait_fn(keys::RUN_WAIT) {
        Some(_) => None,
        None => Some(
            TerminationSignals::for_signals(signals).map_err(ServiceError::InitializationFailure)?,
        ),
    };
    let wait = options.single_shot(keys::RUN_WAIT, move || {
        if let Some(termination) = &termination {
            termination.wait();
        }
    });

    interface
        .start(manager)
        .map_err(ServiceError::ExecutionFailure)?;
    enter(name, RunState::Started);
    info!("Service {name} started");
    notify_ready();

    enter(name, RunState::AwaitingShutdown);
    wait.call();

    notify_stopping();
    let result = interface.stop(manager);
    enter(name, RunState::Stopped);
    info!("Service {name} stopped");
    result.map_err(ServiceError::ExecutionFailure)
}

#[cfg(target_os = "linux")]
fn notify_ready() {
    use tap::TapFallible;
    sd_notify::notify(false, &[sd_notify::NotifyState::Ready])
        .tap_err(|e| tracing::warn!("Error sending ready notification: {e:?}"))
        .ok();
}

#[cfg(target_os = "linux")]
fn notify_stopping() {
    use tap::TapFallible;
    sd_notify::notify(false, &[sd_notify::NotifyState::Stopping])
        .tap_err(|e| tracing::warn!("Error sending stopping notification: {e:?}"))
        .ok();
}

#[cfg(not(target_os = "linux"))]
fn notify_ready() {}

#[cfg(not(target_os = "linux"))]
fn notify_stopping() {}

#[cfg(test)]
#[path = "./run_test.rs"]
mod run_test;
