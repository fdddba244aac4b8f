use std::path::PathBuf;

use initsys_core::process::CommandOutput;
use initsys_core::{Result, ServiceDescriptor, Status};

use super::common::{
    SCRIPT_MODE, ensure_installed, ensure_not_installed, remove_artifact, render,
    require_system_scope, stop_best_effort, write_artifact,
};
use crate::status::interpret_freebsd;
use crate::template::Context;
use crate::{BackendKind, Command, Host, Manager, keys};

const SCRIPT_TEMPLATE: &str = include_str!("../../templates/freebsd.sh");

#[derive(Clone, Debug)]
pub struct FreeBsdServiceManager {
    descriptor: ServiceDescriptor,
    host: Host,
}

impl FreeBsdServiceManager {
    pub fn new(descriptor: ServiceDescriptor, host: Host) -> Self {
        Self { descriptor, host }
    }

    fn service(&self, action: &str) -> Command {
        Command::new("service", [self.name(), action])
    }
}

impl Manager for FreeBsdServiceManager {
    fn kind(&self) -> BackendKind {
        BackendKind::FreeBsd
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn config_path(&self) -> Result<PathBuf> {
        require_system_scope(self.kind(), &self.descriptor)?;
        Ok(self.host.path("/usr/local/etc/rc.d").join(self.name()))
    }

    fn install(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_not_installed(&path)?;
        let context = Context::new(&self.descriptor, &self.descriptor.exec_path()?);
        let script = render(&self.descriptor, keys::SYSV_SCRIPT, SCRIPT_TEMPLATE, context)?;
        write_artifact(&path, &script, SCRIPT_MODE)
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_installed(&path)?;
        stop_best_effort(self);
        remove_artifact(&path)
    }

    fn start(&self) -> Result<()> {
        self.service("start").run(self.host.runner())
    }

    fn stop(&self) -> Result<()> {
        self.service("stop").run(self.host.runner())
    }

    fn restart(&self) -> Result<()> {
        self.service("restart").run(self.host.runner())
    }

    fn status(&self) -> Result<Status> {
        let installed = self.config_path()?.exists();
        let command = self.status_command();
        let output = if installed {
            command.run_with_output(self.host.runner())?
        } else {
            CommandOutput::default()
        };
        interpret_freebsd(installed, &output, &command.to_string())
    }

    fn status_command(&self) -> Command {
        self.service("status")
    }
}
