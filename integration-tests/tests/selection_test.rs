use std::collections::HashSet;
use std::path::{Path, PathBuf};

use initsys::client::{BackendKind, Environment, Registry};
use initsys::core::{Error, Status};
use initsys::logging::LogTarget;
use integration_tests::{TestHost, descriptor};

/// An OpenWrt-like router booted by procd, observed from a daemon it spawned.
struct RouterEnvironment {
    programs: HashSet<&'static str>,
}

impl RouterEnvironment {
    fn new() -> Self {
        Self {
            programs: ["procd", "ubus"].into_iter().collect(),
        }
    }
}

impl Environment for RouterEnvironment {
    fn path_exists(&self, _path: &Path) -> bool {
        false
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.programs
            .contains(program)
            .then(|| Path::new("/sbin").join(program))
    }

    fn read_to_string(&self, _path: &Path) -> Option<String> {
        None
    }

    fn read_link(&self, _path: &Path) -> Option<PathBuf> {
        None
    }

    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    fn parent_pid(&self) -> u32 {
        1
    }
}

#[test]
fn test_select_then_manage() {
    let test_host = TestHost::new(BackendKind::Procd).unwrap();
    let registry = Registry::new([
        BackendKind::Systemd,
        BackendKind::Procd,
        BackendKind::Rcs,
        BackendKind::SystemV,
    ]);
    let backend = registry
        .select(&RouterEnvironment::new(), test_host.host())
        .unwrap();
    assert_eq!(BackendKind::Procd, backend.kind());
    assert_eq!("linux-procd", backend.platform());
    assert!(!backend.interactive());
    assert_eq!(LogTarget::System, backend.log_target());

    let manager = backend.new_service(descriptor("selected"));
    manager.install().unwrap();
    manager.start().unwrap();
    assert_eq!(Status::Running, manager.status().unwrap());
    manager.uninstall().unwrap();
    assert!(matches!(manager.status(), Err(Error::NotInstalled)));
}

#[test]
fn test_no_candidate_matches() {
    let test_host = TestHost::new(BackendKind::Systemd).unwrap();
    let registry = Registry::new([BackendKind::Systemd, BackendKind::Rcs]);
    assert!(matches!(
        registry.select(&RouterEnvironment::new(), test_host.host()),
        Err(Error::NoBackend)
    ));
}
