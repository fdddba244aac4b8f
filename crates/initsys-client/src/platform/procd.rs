use std::path::PathBuf;

use initsys_core::{Error, Result, ServiceDescriptor, Status};

use super::common::{
    SCRIPT_MODE, create_link, ensure_installed, ensure_not_installed, init_script_target,
    remove_artifact, remove_links, render, require_system_scope, stop_best_effort, write_artifact,
};
use crate::status::interpret_procd;
use crate::template::Context;
use crate::{BackendKind, Command, Host, Manager, keys};

const SCRIPT_TEMPLATE: &str = include_str!("../../templates/procd.sh");

#[derive(Clone, Debug)]
pub struct ProcdServiceManager {
    descriptor: ServiceDescriptor,
    host: Host,
    script: PathBuf,
}

impl ProcdServiceManager {
    pub fn new(descriptor: ServiceDescriptor, host: Host) -> Self {
        let script = host.path("/etc/init.d").join(descriptor.name());
        Self {
            descriptor,
            host,
            script,
        }
    }

    fn script(&self, action: &str) -> Command {
        Command::new(self.script.to_string_lossy(), [action])
    }

    fn links(&self) -> [PathBuf; 2] {
        [
            self.host.path(&format!("/etc/rc.d/S50{}", self.name())),
            self.host.path(&format!("/etc/rc.d/K02{}", self.name())),
        ]
    }

    fn context(&self) -> Result<Context> {
        let options = self.descriptor.options();
        Ok(Context::new(&self.descriptor, &self.descriptor.exec_path()?)
            .with(
                "respawn_threshold",
                options.int(
                    keys::RESTART_RESPAWN_THRESHOLD,
                    keys::RESTART_RESPAWN_THRESHOLD_DEFAULT,
                ),
            )
            .with(
                "respawn_timeout",
                options.int(
                    keys::RESTART_RESPAWN_TIMEOUT,
                    keys::RESTART_RESPAWN_TIMEOUT_DEFAULT,
                ),
            )
            .with(
                "respawn_retry",
                options.int(keys::RESTART_RETRY, keys::RESTART_RETRY_DEFAULT),
            ))
    }
}

impl Manager for ProcdServiceManager {
    fn kind(&self) -> BackendKind {
        BackendKind::Procd
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn config_path(&self) -> Result<PathBuf> {
        require_system_scope(self.kind(), &self.descriptor)?;
        Ok(self.script.clone())
    }

    fn install(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_not_installed(&path)?;
        let script = render(
            &self.descriptor,
            keys::SYSV_SCRIPT,
            SCRIPT_TEMPLATE,
            self.context()?,
        )?;
        write_artifact(&path, &script, SCRIPT_MODE)?;
        let target = init_script_target(self.name());
        for link in self.links() {
            create_link(&link, &target)?;
        }
        Ok(())
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_installed(&path)?;
        self.script("disable").run(self.host.runner())?;
        stop_best_effort(self);
        remove_artifact(&path)?;
        // Normally already gone after `disable`
        remove_links(&self.links())
    }

    fn start(&self) -> Result<()> {
        self.script("start").run(self.host.runner())
    }

    fn stop(&self) -> Result<()> {
        self.script("stop").run(self.host.runner())
    }

    fn restart(&self) -> Result<()> {
        self.script("restart").run(self.host.runner())
    }

    fn status(&self) -> Result<Status> {
        if !self.config_path()?.exists() {
            return Err(Error::NotInstalled);
        }
        let command = self.status_command();
        let output = command.run_with_output(self.host.runner())?;
        interpret_procd(&output, &command.to_string())
    }

    fn status_command(&self) -> Command {
        self.script("status")
    }
}
