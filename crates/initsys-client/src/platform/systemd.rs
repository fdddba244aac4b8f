use std::path::PathBuf;

use initsys_core::{Result, ServiceDescriptor, Status};
use tap::TapFallible;
use tracing::{debug, info};

use super::common::{
    CONFIG_MODE, ensure_installed, ensure_not_installed, is_user_service, remove_artifact, render,
    stop_best_effort, write_artifact,
};
use crate::status::{interpret_systemd, systemd_has_output_file_support};
use crate::template::Context;
use crate::{BackendKind, Command, Host, Manager, keys};

const UNIT_TEMPLATE: &str = include_str!("../../templates/systemd.service");

#[derive(Clone, Debug)]
pub struct SystemdServiceManager {
    descriptor: ServiceDescriptor,
    host: Host,
    unit_name: String,
    user: bool,
}

impl SystemdServiceManager {
    pub fn new(descriptor: ServiceDescriptor, host: Host) -> Self {
        let unit_name = format!("{}.service", descriptor.name());
        let user = is_user_service(&descriptor);
        Self {
            descriptor,
            host,
            unit_name,
            user,
        }
    }

    pub fn unit_name(&self) -> &str {
        &self.unit_name
    }

    /// `systemctl <action> [--user] <args>`
    fn systemctl(&self, action: &str, args: &[&str]) -> Command {
        let mut full_args = vec![action];
        if self.user {
            full_args.push("--user");
        }
        full_args.extend_from_slice(args);
        Command::new("systemctl", full_args)
    }

    fn run_unit_action(&self, action: &str) -> Result<()> {
        self.systemctl(action, &[self.unit_name.as_str()])
            .run(self.host.runner())
            .tap_ok(|_| info!("systemctl {action} {}", self.unit_name))
    }

    fn daemon_reload(&self) -> Result<()> {
        self.systemctl("daemon-reload", &[]).run(self.host.runner())
    }

    fn list_unit_files(&self) -> Result<String> {
        let command = self.systemctl("list-unit-files", &["-t", "service", self.unit_name.as_str()]);
        Ok(command.run_with_output(self.host.runner())?.stdout)
    }

    fn has_output_file_support(&self) -> bool {
        Command::new("systemctl", ["--version"])
            .run_with_output(self.host.runner())
            .tap_err(|e| debug!("Unable to query the systemd version: {e}"))
            .map(|output| output.success() && systemd_has_output_file_support(&output.stdout))
            .unwrap_or(false)
    }

    fn context(&self) -> Result<Context> {
        let options = self.descriptor.options();
        Ok(Context::new(&self.descriptor, &self.descriptor.exec_path()?)
            .with("has_output_file_support", self.has_output_file_support())
            .with("reload_signal", options.string(keys::RELOAD_SIGNAL, ""))
            .with("pid_file", options.string(keys::PID_FILE, ""))
            .with(
                "limit_nofile",
                options.int(keys::LIMIT_NOFILE, keys::LIMIT_NOFILE_DEFAULT),
            )
            .with(
                "restart",
                options.string(keys::RESTART, keys::RESTART_DEFAULT),
            )
            .with(
                "success_exit_status",
                options.string(keys::SUCCESS_EXIT_STATUS, ""),
            )
            .with(
                "log_output",
                options.bool(keys::LOG_OUTPUT, keys::LOG_OUTPUT_DEFAULT),
            )
            .with(
                "log_directory",
                options.string(keys::LOG_DIRECTORY, keys::LOG_DIRECTORY_DEFAULT),
            )
            .with(
                "restart_sec",
                options.int(keys::RESTART_SEC, keys::RESTART_SEC_DEFAULT),
            )
            .with("user_service", self.user))
    }
}

impl Manager for SystemdServiceManager {
    fn kind(&self) -> BackendKind {
        BackendKind::Systemd
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn config_path(&self) -> Result<PathBuf> {
        if self.user {
            Ok(self
                .host
                .home_dir()?
                .join(".config/systemd/user")
                .join(&self.unit_name))
        } else {
            Ok(self.host.path("/etc/systemd/system").join(&self.unit_name))
        }
    }

    fn install(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_not_installed(&path)?;
        let unit = render(
            &self.descriptor,
            keys::SYSTEMD_SCRIPT,
            UNIT_TEMPLATE,
            self.context()?,
        )?;
        write_artifact(&path, &unit, CONFIG_MODE)?;
        self.run_unit_action("enable")?;
        self.daemon_reload()
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_installed(&path)?;
        self.run_unit_action("disable")?;
        stop_best_effort(self);
        remove_artifact(&path)?;
        self.daemon_reload()
    }

    fn start(&self) -> Result<()> {
        self.run_unit_action("start")
    }

    fn stop(&self) -> Result<()> {
        self.run_unit_action("stop")
    }

    fn restart(&self) -> Result<()> {
        self.run_unit_action("restart")
    }

    fn status(&self) -> Result<Status> {
        let output = self.status_command().run_with_output(self.host.runner())?;
        interpret_systemd(&output, &self.unit_name, || self.list_unit_files())
    }

    fn status_command(&self) -> Command {
        self.systemctl("is-active", &[self.unit_name.as_str()])
    }
}
