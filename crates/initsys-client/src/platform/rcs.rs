use std::path::PathBuf;

use initsys_core::{Error, Result, ServiceDescriptor, Status};

use super::common::{
    SCRIPT_MODE, create_link, ensure_installed, ensure_not_installed, init_script_target,
    remove_artifact, remove_links, render, require_system_scope, restart_with_delay,
    stop_best_effort, write_artifact,
};
use crate::status::interpret_init_script;
use crate::template::Context;
use crate::{BackendKind, Command, Host, Manager, keys};

const SCRIPT_TEMPLATE: &str = include_str!("../../templates/rcs.sh");

/// BusyBox-style init driven by `/etc/init.d/rcS`, without a `service` wrapper.
#[derive(Clone, Debug)]
pub struct RcsServiceManager {
    descriptor: ServiceDescriptor,
    host: Host,
    script: String,
}

impl RcsServiceManager {
    pub fn new(descriptor: ServiceDescriptor, host: Host) -> Self {
        let script = format!("/etc/init.d/{}", descriptor.name());
        Self {
            descriptor,
            host,
            script,
        }
    }

    fn script(&self, action: &str) -> Command {
        Command::new(self.host.path(&self.script).to_string_lossy(), [action])
    }

    fn start_link(&self) -> PathBuf {
        self.host.path(&format!("/etc/rc.d/S50{}", self.name()))
    }
}

impl Manager for RcsServiceManager {
    fn kind(&self) -> BackendKind {
        BackendKind::Rcs
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn config_path(&self) -> Result<PathBuf> {
        require_system_scope(self.kind(), &self.descriptor)?;
        Ok(self.host.path(&self.script))
    }

    fn install(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_not_installed(&path)?;
        let context = Context::new(&self.descriptor, &self.descriptor.exec_path()?).with(
            "log_directory",
            self.descriptor
                .options()
                .string(keys::LOG_DIRECTORY, keys::LOG_DIRECTORY_DEFAULT),
        );
        let script = render(&self.descriptor, keys::RCS_SCRIPT, SCRIPT_TEMPLATE, context)?;
        write_artifact(&path, &script, SCRIPT_MODE)?;
        create_link(&self.start_link(), &init_script_target(self.name()))
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_installed(&path)?;
        stop_best_effort(self);
        remove_artifact(&path)?;
        remove_links(&[self.start_link()])
    }

    fn start(&self) -> Result<()> {
        self.script("start").run(self.host.runner())
    }

    fn stop(&self) -> Result<()> {
        self.script("stop").run(self.host.runner())
    }

    fn restart(&self) -> Result<()> {
        restart_with_delay(self)
    }

    fn status(&self) -> Result<Status> {
        if !self.config_path()?.exists() {
            return Err(Error::NotInstalled);
        }
        let output = self.status_command().run_with_output(self.host.runner())?;
        interpret_init_script(&output)
    }

    fn status_command(&self) -> Command {
        self.script("status")
    }
}
