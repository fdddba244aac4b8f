use std::path::PathBuf;

use initsys_core::{Result, ServiceDescriptor, Status};

use super::common::{
    SCRIPT_MODE, create_links, ensure_installed, ensure_not_installed, init_script_target,
    remove_artifact, remove_links, render, require_system_scope, stop_best_effort,
    write_artifact,
};
use crate::status::interpret_init_script;
use crate::template::Context;
use crate::{BackendKind, Command, Host, Manager, keys};

const SCRIPT_TEMPLATE: &str = include_str!("../../templates/sysv.sh");

const START_RUNLEVELS: [u8; 4] = [2, 3, 4, 5];
const KILL_RUNLEVELS: [u8; 3] = [0, 1, 6];

#[derive(Clone, Debug)]
pub struct SysvServiceManager {
    descriptor: ServiceDescriptor,
    host: Host,
}

impl SysvServiceManager {
    pub fn new(descriptor: ServiceDescriptor, host: Host) -> Self {
        Self { descriptor, host }
    }

    fn service(&self, action: &str) -> Command {
        Command::new("service", [self.name(), action])
    }

    /// `/etc/rc{2,3,4,5}.d/S50<name>` followed by `/etc/rc{0,1,6}.d/K02<name>`.
    pub fn runlevel_links(&self) -> Vec<PathBuf> {
        let start = START_RUNLEVELS
            .iter()
            .map(|level| self.host.path(&format!("/etc/rc{level}.d/S50{}", self.name())));
        let kill = KILL_RUNLEVELS
            .iter()
            .map(|level| self.host.path(&format!("/etc/rc{level}.d/K02{}", self.name())));
        start.chain(kill).collect()
    }
}

impl Manager for SysvServiceManager {
    fn kind(&self) -> BackendKind {
        BackendKind::SystemV
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn config_path(&self) -> Result<PathBuf> {
        require_system_scope(self.kind(), &self.descriptor)?;
        Ok(self.host.path("/etc/init.d").join(self.name()))
    }

    fn install(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_not_installed(&path)?;
        let options = self.descriptor.options();
        let context = Context::new(&self.descriptor, &self.descriptor.exec_path()?).with(
            "log_directory",
            options.string(keys::LOG_DIRECTORY, keys::LOG_DIRECTORY_DEFAULT),
        );
        let script = render(&self.descriptor, keys::SYSV_SCRIPT, SCRIPT_TEMPLATE, context)?;
        write_artifact(&path, &script, SCRIPT_MODE)?;

        let strict = options.bool(
            keys::SYSV_STRICT_SYMLINKS,
            keys::SYSV_STRICT_SYMLINKS_DEFAULT,
        );
        create_links(
            &self.runlevel_links(),
            &init_script_target(self.name()),
            strict,
        )
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_installed(&path)?;
        stop_best_effort(self);
        remove_artifact(&path)?;
        remove_links(&self.runlevel_links())
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
        let output = self.status_command().run_with_output(self.host.runner())?;
        interpret_init_script(&output)
    }

    fn status_command(&self) -> Command {
        self.service("status")
    }
}
