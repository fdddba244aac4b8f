use std::fs;
use std::time::Instant;

use initsys::client::{BackendKind, QUIESCENT_DELAY, keys};
use initsys::core::{Error, ServiceDescriptor, Status};
use integration_tests::{TestHost, descriptor};

fn exercise_lifecycle(kind: BackendKind) {
    let host = TestHost::new(kind).unwrap();
    let manager = host.manager(descriptor("lifecycle"));
    assert!(matches!(manager.status(), Err(Error::NotInstalled)));

    manager.install().unwrap();
    let path = manager.config_path().unwrap();
    assert!(path.starts_with(host.path("/")));
    assert_eq!(Status::Stopped, manager.status().unwrap());

    let artifact = fs::read(&path).unwrap();
    assert!(matches!(manager.install(), Err(Error::AlreadyInstalled(p)) if p == path));
    assert_eq!(artifact, fs::read(&path).unwrap());

    manager.start().unwrap();
    assert_eq!(Status::Running, manager.status().unwrap());
    assert!(host.init().is_running("lifecycle"));

    let restart_started = Instant::now();
    manager.restart().unwrap();
    if !kind.has_native_restart() {
        assert!(restart_started.elapsed() >= QUIESCENT_DELAY);
    }
    assert_eq!(Status::Running, manager.status().unwrap());

    manager.stop().unwrap();
    assert_eq!(Status::Stopped, manager.status().unwrap());

    manager.start().unwrap();
    manager.uninstall().unwrap();
    assert!(!path.exists());
    assert!(!host.init().is_running("lifecycle"));
    assert!(matches!(manager.status(), Err(Error::NotInstalled)));
    assert!(matches!(manager.uninstall(), Err(Error::NotInstalled)));
}

#[test]
fn test_systemd_lifecycle() {
    exercise_lifecycle(BackendKind::Systemd);
}

#[test]
fn test_sysv_lifecycle() {
    exercise_lifecycle(BackendKind::SystemV);
}

#[test]
fn test_procd_lifecycle() {
    exercise_lifecycle(BackendKind::Procd);
}

#[test]
fn test_rcs_lifecycle() {
    exercise_lifecycle(BackendKind::Rcs);
}

#[test]
fn test_freebsd_lifecycle() {
    exercise_lifecycle(BackendKind::FreeBsd);
}

#[test]
fn test_solaris_lifecycle() {
    exercise_lifecycle(BackendKind::Solaris);
}

#[test]
fn test_launchd_lifecycle() {
    exercise_lifecycle(BackendKind::Launchd);
}

#[test]
fn test_systemd_command_sequence() {
    let host = TestHost::new(BackendKind::Systemd).unwrap();
    let manager = host.manager(descriptor("sequence"));
    manager.install().unwrap();
    manager.uninstall().unwrap();
    assert_eq!(
        vec![
            "systemctl --version",
            "systemctl enable sequence.service",
            "systemctl daemon-reload",
            "systemctl disable sequence.service",
            "systemctl stop sequence.service",
            "systemctl daemon-reload",
        ],
        host.init().history()
    );
}

#[test]
fn test_restart_order_without_native_restart() {
    let host = TestHost::new(BackendKind::Launchd).unwrap();
    let manager = host.manager(descriptor("ordered"));
    manager.install().unwrap();
    manager.start().unwrap();
    let before = host.init().history().len();
    manager.restart().unwrap();
    let plist = manager.config_path().unwrap();
    assert_eq!(
        vec![
            format!("launchctl unload {}", plist.display()),
            format!("launchctl load {}", plist.display()),
        ],
        host.init().history()[before..].to_vec()
    );
}

#[test]
fn test_sysv_runlevel_links() {
    let host = TestHost::new(BackendKind::SystemV).unwrap();
    let manager = host.manager(descriptor("links"));
    manager.install().unwrap();
    for level in [2, 3, 4, 5] {
        assert!(fs::symlink_metadata(host.path(&format!("/etc/rc{level}.d/S50links"))).is_ok());
    }
    for level in [0, 1, 6] {
        assert!(fs::symlink_metadata(host.path(&format!("/etc/rc{level}.d/K02links"))).is_ok());
    }
    manager.uninstall().unwrap();
    assert!(fs::symlink_metadata(host.path("/etc/rc2.d/S50links")).is_err());
}

#[test]
fn test_rendered_artifacts_reference_descriptor() {
    for kind in [
        BackendKind::Systemd,
        BackendKind::SystemV,
        BackendKind::Procd,
        BackendKind::Rcs,
        BackendKind::FreeBsd,
        BackendKind::Solaris,
        BackendKind::Launchd,
    ] {
        let host = TestHost::new(kind).unwrap();
        let manager = host.manager(descriptor("rendered"));
        manager.install().unwrap();
        let artifact = fs::read_to_string(manager.config_path().unwrap()).unwrap();
        assert!(
            artifact.contains("/usr/local/bin/integration-service"),
            "{kind} artifact is missing the executable:\n{artifact}"
        );
        assert!(
            artifact.contains("8080"),
            "{kind} artifact is missing the arguments:\n{artifact}"
        );
    }
}

#[test]
fn test_systemd_uninstall_stops_running_unit() {
    let host = TestHost::new(BackendKind::Systemd).unwrap();
    let manager = host.manager(descriptor("running"));
    manager.install().unwrap();
    manager.start().unwrap();
    manager.uninstall().unwrap();
    assert!(!host.init().is_enabled("running"));
    assert!(!host.init().is_running("running"));
    let history = host.init().history();
    let disable = history.iter().position(|c| c == "systemctl disable running.service");
    let stop = history.iter().position(|c| c == "systemctl stop running.service");
    assert!(disable.is_some() && disable < stop);
}

#[test]
fn test_systemd_user_unit_lifecycle() {
    let host = TestHost::new(BackendKind::Systemd).unwrap();
    let per_user = ServiceDescriptor::builder("per-user")
        .with_executable("/usr/local/bin/integration-service")
        .with_option(keys::USER_SERVICE, true)
        .build();
    let manager = host.manager(per_user);
    manager.install().unwrap();
    assert!(host.path("/home/tester/.config/systemd/user/per-user.service").is_file());
    manager.start().unwrap();
    assert!(host.init().history().contains(&"systemctl start --user per-user.service".to_owned()));
    assert_eq!(Status::Running, manager.status().unwrap());
    manager.uninstall().unwrap();
    assert!(!host.init().is_running("per-user"));
    assert!(matches!(manager.status(), Err(Error::NotInstalled)));
}
