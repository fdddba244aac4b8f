use std::io::{self, Write};

use initsys::client::{Backend, BackendKind, Host};
use initsys::core::{BoxedError, ServiceDescriptor};
use initsys::logging::LoggerBuilder;
use initsys::server::{Interface, Manager, run};

struct App;

impl Interface for App {
    type Error = io::Error;

    fn start(&mut self, manager: &dyn Manager) -> Result<(), Self::Error> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "started {}", manager.name())?;
        stdout.flush()
    }

    fn stop(&mut self, manager: &dyn Manager) -> Result<(), Self::Error> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "stopped {}", manager.name())?;
        stdout.flush()
    }
}

fn main() -> Result<(), BoxedError> {
    LoggerBuilder::new("run-loop-app").init()?;
    let descriptor = ServiceDescriptor::builder("run-loop-app").build();
    let manager = Backend::new(BackendKind::Systemd, true, Host::system()).new_service(descriptor);
    run(manager.as_ref(), &mut App)?;
    Ok(())
}
