use initsys_core::{Error, Result, ServiceDescriptor};
use initsys_logging::{LogTarget, LoggerBuilder};
use tracing::{debug, info};

use crate::detect::{
    freebsd_interactive, is_procd, is_rcs, is_systemd, linux_interactive, parent_is_not_init,
};
use crate::platform::{
    FreeBsdServiceManager, LaunchdServiceManager, ProcdServiceManager, RcsServiceManager,
    SolarisServiceManager, SystemdServiceManager, SysvServiceManager,
};
use crate::{Environment, Host, Manager};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
pub enum BackendKind {
    #[strum(serialize = "linux-systemd")]
    Systemd,
    #[strum(serialize = "linux-procd")]
    Procd,
    #[strum(serialize = "linux-rcs")]
    Rcs,
    #[strum(serialize = "unix-systemv")]
    SystemV,
    #[strum(serialize = "freebsd")]
    FreeBsd,
    #[strum(serialize = "solaris-smf")]
    Solaris,
    #[strum(serialize = "darwin-launchd")]
    Launchd,
}

impl BackendKind {
    /// Whether this init system manages the host described by `env`.
    pub fn detect(&self, env: &dyn Environment) -> bool {
        match self {
            BackendKind::Systemd => is_systemd(env),
            BackendKind::Procd => is_procd(env),
            BackendKind::Rcs => is_rcs(env),
            // Platform fallbacks
            BackendKind::SystemV
            | BackendKind::FreeBsd
            | BackendKind::Solaris
            | BackendKind::Launchd => true,
        }
    }

    /// Whether the current process is attached to a session rather than supervised.
    pub fn interactive(&self, env: &dyn Environment) -> bool {
        match self {
            BackendKind::Systemd | BackendKind::Procd | BackendKind::Rcs | BackendKind::SystemV => {
                linux_interactive(env)
            }
            BackendKind::FreeBsd => freebsd_interactive(env),
            BackendKind::Solaris | BackendKind::Launchd => parent_is_not_init(env),
        }
    }

    pub fn supports_user_scope(&self) -> bool {
        matches!(self, BackendKind::Systemd | BackendKind::Launchd)
    }

    /// Native restart exists; otherwise restart is stop, a quiescent delay, then start.
    pub fn has_native_restart(&self) -> bool {
        matches!(
            self,
            BackendKind::Systemd | BackendKind::Procd | BackendKind::SystemV | BackendKind::FreeBsd
        )
    }

    /// Candidates for the compiled platform, highest priority first.
    ///
    /// Several probes can match the same Linux host (a systemd machine usually also has a
    /// `service` wrapper), so the order here is what decides.
    pub fn platform_candidates() -> Vec<BackendKind> {
        if cfg!(target_os = "linux") {
            vec![
                BackendKind::Systemd,
                BackendKind::Procd,
                BackendKind::Rcs,
                BackendKind::SystemV,
            ]
        } else if cfg!(target_os = "freebsd") {
            vec![BackendKind::FreeBsd]
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            vec![BackendKind::Solaris]
        } else if cfg!(target_os = "macos") {
            vec![BackendKind::Launchd]
        } else {
            vec![]
        }
    }
}

/// The init system chosen for this process.
#[derive(Clone, Debug)]
pub struct Backend {
    kind: BackendKind,
    interactive: bool,
    host: Host,
}

impl Backend {
    pub fn new(kind: BackendKind, interactive: bool, host: Host) -> Self {
        Self {
            kind,
            interactive,
            host,
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn platform(&self) -> String {
        self.kind.to_string()
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn new_service(&self, descriptor: ServiceDescriptor) -> Box<dyn Manager> {
        let host = self.host.clone();
        match self.kind {
            BackendKind::Systemd => Box::new(SystemdServiceManager::new(descriptor, host)),
            BackendKind::Procd => Box::new(ProcdServiceManager::new(descriptor, host)),
            BackendKind::Rcs => Box::new(RcsServiceManager::new(descriptor, host)),
            BackendKind::SystemV => Box::new(SysvServiceManager::new(descriptor, host)),
            BackendKind::FreeBsd => Box::new(FreeBsdServiceManager::new(descriptor, host)),
            BackendKind::Solaris => Box::new(SolarisServiceManager::new(descriptor, host)),
            BackendKind::Launchd => Box::new(LaunchdServiceManager::new(descriptor, host)),
        }
    }

    /// Console output when attached to a session, the native system log otherwise.
    pub fn log_target(&self) -> LogTarget {
        if self.interactive {
            LogTarget::Console
        } else {
            LogTarget::System
        }
    }

    pub fn logger(&self, descriptor: &ServiceDescriptor) -> LoggerBuilder {
        LoggerBuilder::new(descriptor.name()).with_target(self.log_target())
    }
}

/// Ordered list of candidate backends. The first one whose probe matches wins.
#[derive(Clone, Debug)]
pub struct Registry {
    candidates: Vec<BackendKind>,
}

impl Registry {
    pub fn new(candidates: impl IntoIterator<Item = BackendKind>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }

    pub fn for_current_platform() -> Self {
        Self::new(BackendKind::platform_candidates())
    }

    pub fn candidates(&self) -> &[BackendKind] {
        &self.candidates
    }

    pub fn detect(&self, env: &dyn Environment) -> Option<BackendKind> {
        self.candidates.iter().copied().find(|kind| {
            let matched = kind.detect(env);
            debug!("Probe for {kind}: {matched}");
            matched
        })
    }

    pub fn select(&self, env: &dyn Environment, host: Host) -> Result<Backend> {
        let kind = self.detect(env).ok_or(Error::NoBackend)?;
        let interactive = kind.interactive(env);
        info!("Selected init system {kind} (interactive: {interactive})");
        Ok(Backend::new(kind, interactive, host))
    }
}

#[cfg(test)]
#[path = "./backend_test.rs"]
mod backend_test;
