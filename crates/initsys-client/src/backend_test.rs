use std::str::FromStr;

use initsys_core::{Error, ServiceDescriptor};
use initsys_logging::LogTarget;
use strum::IntoEnumIterator;

use crate::test_util::FakeEnvironment;
use crate::{Backend, BackendKind, Host, Registry};

fn systemd_host_with_procd() -> FakeEnvironment {
    FakeEnvironment::new()
        .with_path("/run/systemd/system")
        .with_program("procd")
        .with_program("service")
}

#[test]
fn test_first_match_wins() {
    let env = systemd_host_with_procd();

    let registry = Registry::new([BackendKind::Systemd, BackendKind::Procd, BackendKind::SystemV]);
    assert_eq!(Some(BackendKind::Systemd), registry.detect(&env));

    let registry = Registry::new([BackendKind::Procd, BackendKind::Systemd, BackendKind::SystemV]);
    assert_eq!(Some(BackendKind::Procd), registry.detect(&env));
}

#[test]
fn test_fallback_to_sysv() {
    let registry = Registry::new([
        BackendKind::Systemd,
        BackendKind::Procd,
        BackendKind::Rcs,
        BackendKind::SystemV,
    ]);
    assert_eq!(
        Some(BackendKind::SystemV),
        registry.detect(&FakeEnvironment::new())
    );
}

#[test]
fn test_no_match() {
    let registry = Registry::new([BackendKind::Systemd, BackendKind::Procd]);
    assert!(matches!(
        registry.select(&FakeEnvironment::new(), Host::system()),
        Err(Error::NoBackend)
    ));
    let registry = Registry::new([]);
    assert!(registry.detect(&FakeEnvironment::new()).is_none());
}

#[test]
fn test_select_is_deterministic() {
    let env = systemd_host_with_procd();
    let registry = Registry::for_current_platform();
    let first = registry.detect(&env);
    for _ in 0..5 {
        assert_eq!(first, registry.detect(&env));
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_linux_priority() {
    assert_eq!(
        vec![
            BackendKind::Systemd,
            BackendKind::Procd,
            BackendKind::Rcs,
            BackendKind::SystemV
        ],
        Registry::for_current_platform().candidates()
    );
}

#[test]
fn test_select_evaluates_interactive() {
    let registry = Registry::new([BackendKind::Systemd]);
    let env = FakeEnvironment::new()
        .with_path("/run/systemd/system")
        .with_ppid(1);
    let backend = registry.select(&env, Host::system()).unwrap();
    assert_eq!(BackendKind::Systemd, backend.kind());
    assert!(!backend.interactive());
    assert_eq!(LogTarget::System, backend.log_target());

    let env = FakeEnvironment::new()
        .with_path("/run/systemd/system")
        .with_ppid(999);
    let backend = registry.select(&env, Host::system()).unwrap();
    assert!(backend.interactive());
    assert_eq!(LogTarget::Console, backend.log_target());
}

#[test]
fn test_platform_tags_round_trip() {
    for kind in BackendKind::iter() {
        assert_eq!(kind, BackendKind::from_str(&kind.to_string()).unwrap());
    }
    assert_eq!("linux-systemd", BackendKind::Systemd.to_string());
    assert_eq!("unix-systemv", BackendKind::SystemV.to_string());
    assert_eq!("solaris-smf", BackendKind::Solaris.to_string());
    assert_eq!("darwin-launchd", BackendKind::Launchd.to_string());
}

#[test]
fn test_user_scope_capability() {
    let supported: Vec<_> = BackendKind::iter()
        .filter(|kind| kind.supports_user_scope())
        .collect();
    assert_eq!(vec![BackendKind::Systemd, BackendKind::Launchd], supported);
}

#[test]
fn test_factory_binds_kind() {
    for kind in BackendKind::iter() {
        let backend = Backend::new(kind, true, Host::system());
        let manager = backend.new_service(ServiceDescriptor::builder("myservice").build());
        assert_eq!(kind, manager.kind());
        assert_eq!("myservice", manager.name());
        assert_eq!(kind.to_string(), manager.platform());
    }
}
