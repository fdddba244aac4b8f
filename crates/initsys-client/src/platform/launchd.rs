use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::PathBuf;

use initsys_core::{Error, Result, ServiceDescriptor, Status};

use super::common::{
    CONFIG_MODE, ensure_installed, ensure_not_installed, is_user_service, remove_artifact,
    render, restart_with_delay, stop_best_effort, write_artifact,
};
use crate::status::interpret_launchd;
use crate::template::Context;
use crate::{BackendKind, Command, Host, Manager, keys};

const PLIST_TEMPLATE: &str = include_str!("../../templates/launchd.plist");

#[derive(Clone, Debug)]
pub struct LaunchdServiceManager {
    descriptor: ServiceDescriptor,
    host: Host,
    user: bool,
}

impl LaunchdServiceManager {
    pub fn new(descriptor: ServiceDescriptor, host: Host) -> Self {
        let user = is_user_service(&descriptor);
        Self {
            descriptor,
            host,
            user,
        }
    }

    fn user_agent_dir(&self) -> Result<PathBuf> {
        Ok(self.host.home_dir()?.join("Library/LaunchAgents"))
    }

    fn log_dir(&self) -> Result<String> {
        let custom = self.descriptor.options().string(keys::LOG_DIRECTORY, "");
        if !custom.is_empty() {
            Ok(custom)
        } else if self.user {
            Ok(self.host.home_dir()?.to_string_lossy().into_owned())
        } else {
            Ok(keys::LOG_DIRECTORY_DEFAULT.to_owned())
        }
    }

    /// `<dir>/<name>.out.log` and `<dir>/<name>.err.log`
    pub fn log_paths(&self) -> Result<(String, String)> {
        let dir = self.log_dir()?;
        Ok((
            format!("{dir}/{}.out.log", self.name()),
            format!("{dir}/{}.err.log", self.name()),
        ))
    }

    fn launchctl(&self, action: &str) -> Result<Command> {
        let path = self.config_path()?;
        Ok(Command::new(
            "launchctl",
            [action.to_owned(), path.to_string_lossy().into_owned()],
        ))
    }

    fn context(&self) -> Result<Context> {
        let options = self.descriptor.options();
        let (stdout_path, stderr_path) = self.log_paths()?;
        Ok(Context::new(&self.descriptor, &self.descriptor.exec_path()?)
            .with(
                "keep_alive",
                options.bool(keys::KEEP_ALIVE, keys::KEEP_ALIVE_DEFAULT),
            )
            .with(
                "run_at_load",
                options.bool(keys::RUN_AT_LOAD, keys::RUN_AT_LOAD_DEFAULT),
            )
            .with(
                "session_create",
                options.bool(keys::SESSION_CREATE, keys::SESSION_CREATE_DEFAULT),
            )
            .with("standard_out_path", stdout_path)
            .with("standard_error_path", stderr_path))
    }
}

impl Manager for LaunchdServiceManager {
    fn kind(&self) -> BackendKind {
        BackendKind::Launchd
    }

    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn config_path(&self) -> Result<PathBuf> {
        let dir = if self.user {
            self.user_agent_dir()?
        } else {
            self.host.path("/Library/LaunchDaemons")
        };
        Ok(dir.join(format!("{}.plist", self.name())))
    }

    fn install(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_not_installed(&path)?;
        let plist = render(
            &self.descriptor,
            keys::LAUNCHD_CONFIG,
            PLIST_TEMPLATE,
            self.context()?,
        )?;
        if self.user {
            let dir = self.user_agent_dir()?;
            DirBuilder::new()
                .recursive(true)
                .mode(0o700)
                .create(&dir)
                .map_err(Error::filesystem("creating", &dir))?;
        }
        // Loaded on start
        write_artifact(&path, &plist, CONFIG_MODE)
    }

    fn uninstall(&self) -> Result<()> {
        let path = self.config_path()?;
        ensure_installed(&path)?;
        stop_best_effort(self);
        remove_artifact(&path)
    }

    fn start(&self) -> Result<()> {
        self.launchctl("load")?.run(self.host.runner())
    }

    fn stop(&self) -> Result<()> {
        self.launchctl("unload")?.run(self.host.runner())
    }

    fn restart(&self) -> Result<()> {
        restart_with_delay(self)
    }

    fn status(&self) -> Result<Status> {
        let output = self.status_command().run_with_output(self.host.runner())?;
        interpret_launchd(&output, self.config_path()?.exists())
    }

    fn status_command(&self) -> Command {
        Command::new("launchctl", ["list", self.name()])
    }
}
