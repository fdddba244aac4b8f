use std::path::PathBuf;

use initsys_core::{Result, ServiceDescriptor, Status};

use super::common::{
    CONFIG_MODE, ensure_installed, ensure_not_installed, remove_artifact, render,
    require_system_scope, restart_with_delay, stop_best_effort, write_artifact,
};
use crate::status::interpret_solaris;
use crate::template::{Context, xml_escape};
use crate::{BackendKind, Command, Host, Manager, keys};

const MANIFEST_TEMPLATE: &str = include_str!("../../templates/solaris.xml");

#[derive(Clone, Debug)]
pub struct SolarisServiceManager {
    descriptor: ServiceDescriptor,
    host: Host,
    prefix: String,
}

impl SolarisServiceManager {
    pub fn new(descriptor: ServiceDescriptor, host: Host) -> Self {
        let prefix = descriptor
            .options()
            .string(keys::PREFIX, keys::PREFIX_DEFAULT);
        Self {
            descriptor,
            host,
            prefix,
        }
    }

    /// `svc:/<prefix>/<name>:default`
    pub fn fmri(&self) -> String {
        format!("svc:/{}/{}:default", self.prefix, self.name())
    }

    fn svcadm(&self, action: &str) -> Command {
        Command::new("svcadm", [action.to_owned(), self.fmri()])
    }

    fn import_manifests(&self) -> Result<()> {
        Command::new("svcadm", ["restart", "manifest-import"]).run(self.host.runner())
    }
}

impl Manager for SolarisServiceManager {
    fn kind(&self) -> BackendKind {
        BackendKind::Solaris
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn config_path(&self) -> Result<PathBuf> {
        require_system_scope(self.kind(), &self.descriptor)?;
        Ok(self
            .host
            .path("/lib/svc/manifest")
            .join(&self.prefix)
            .join(format!("{}.xml", self.name())))
    }

    fn install(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_not_installed(&path)?;
        let context = Context::new(&self.descriptor, &self.descriptor.exec_path()?)
            .with("prefix", &self.prefix)
            .with("display", xml_escape(self.display_name()));
        let manifest = render(
            &self.descriptor,
            keys::SYSV_SCRIPT,
            MANIFEST_TEMPLATE,
            context,
        )?;
        write_artifact(&path, &manifest, CONFIG_MODE)?;
        self.import_manifests()
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_installed(&path)?;
        stop_best_effort(self);
        remove_artifact(&path)?;
        self.import_manifests()
    }

    fn start(&self) -> Result<()> {
        self.svcadm("enable").run(self.host.runner())
    }

    fn stop(&self) -> Result<()> {
        self.svcadm("disable").run(self.host.runner())
    }

    fn restart(&self) -> Result<()> {
        restart_with_delay(self)
    }

    fn status(&self) -> Result<Status> {
        let output = self.status_command().run_with_output(self.host.runner())?;
        interpret_solaris(&output, &self.fmri())
    }

    fn status_command(&self) -> Command {
        Command::new("svcs", [self.fmri()])
    }
}
