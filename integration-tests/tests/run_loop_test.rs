use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use initsys::client::{BackendKind, Manager, keys};
use initsys::core::{Options, ServiceDescriptor};
use initsys::server::{Interface, ServiceError, run};
use integration_tests::TestHost;

struct ManagedApp {
    events: Arc<Mutex<Vec<String>>>,
}

impl Interface for ManagedApp {
    type Error = initsys::core::Error;

    fn start(&mut self, manager: &dyn Manager) -> Result<(), Self::Error> {
        self.events.lock().unwrap().push("start".to_owned());
        manager.start()
    }

    fn stop(&mut self, manager: &dyn Manager) -> Result<(), Self::Error> {
        self.events.lock().unwrap().push("stop".to_owned());
        manager.stop()
    }
}

#[test]
fn test_run_with_wait_override() {
    let host = TestHost::new(BackendKind::SystemV).unwrap();
    let events = Arc::new(Mutex::new(vec![]));
    let wait_events = events.clone();
    let descriptor = ServiceDescriptor::builder("looped")
        .with_executable("/usr/local/bin/looped")
        .with_options(Options::new().with_wait_fn(keys::RUN_WAIT, move || {
            wait_events.lock().unwrap().push("wait".to_owned());
        }))
        .build();
    let manager = host.manager(descriptor);
    manager.install().unwrap();

    run(manager.as_ref(), &mut ManagedApp { events: events.clone() }).unwrap();
    assert_eq!(vec!["start", "wait", "stop"], *events.lock().unwrap());
    assert!(!host.init().is_running("looped"));
    assert!(
        host.init()
            .history()
            .ends_with(&["service looped start".to_owned(), "service looped stop".to_owned()])
    );
}

#[test]
fn test_start_failure_is_returned() {
    let host = TestHost::new(BackendKind::SystemV).unwrap();
    let events = Arc::new(Mutex::new(vec![]));
    // Never installed, so the native start fails
    let manager = host.manager(
        ServiceDescriptor::builder("missing")
            .with_executable("/usr/local/bin/missing")
            .with_options(Options::new().with_wait_fn(keys::RUN_WAIT, || {}))
            .build(),
    );
    let result = run(manager.as_ref(), &mut ManagedApp { events: events.clone() });
    assert!(matches!(
        result,
        Err(ServiceError::ExecutionFailure(initsys::core::Error::CommandFailed { .. }))
    ));
    assert_eq!(vec!["start"], *events.lock().unwrap());
}

#[cfg(unix)]
#[test]
fn test_termination_signal_stops_service() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_run_loop_app"))
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut lines = BufReader::new(child.stdout.take().unwrap()).lines();
    assert_eq!("started run-loop-app", lines.next().unwrap().unwrap());

    // Handlers are registered before start, so the signal can go out right away
    let pid = i32::try_from(child.id()).unwrap();
    assert_eq!(0, unsafe { libc::kill(pid, libc::SIGTERM) });

    assert_eq!("stopped run-loop-app", lines.next().unwrap().unwrap());
    assert!(child.wait().unwrap().success());
}
