use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::Options;

#[test]
fn test_typed_reads() {
    let options = Options::new()
        .with("Restart", "on-failure")
        .with("UserService", true)
        .with("RestartSec", 5);

    assert_eq!("on-failure", options.string("Restart", "always"));
    assert!(options.bool("UserService", false));
    assert_eq!(5, options.int("RestartSec", 120));
}

#[test]
fn test_missing_key_reads_default() {
    let options = Options::new();

    assert_eq!("always", options.string("Restart", "always"));
    assert!(options.bool("KeepAlive", true));
    assert_eq!(-1, options.int("LimitNOFILE", -1));
}

#[test]
fn test_mismatched_type_reads_default() {
    let options = Options::new().with("UserService", "yes").with("LogDirectory", 3);

    assert!(!options.bool("UserService", false));
    assert_eq!("/var/log", options.string("LogDirectory", "/var/log"));
}

#[test]
fn test_single_shot_uses_configured_fn() {
    let configured = Arc::new(AtomicUsize::new(0));
    let default = Arc::new(AtomicUsize::new(0));
    let configured_ = configured.clone();
    let default_ = default.clone();
    let options = Options::new().with_wait_fn("RunWait", move || {
        configured_.fetch_add(1, Ordering::SeqCst);
    });

    let wait = options.single_shot("RunWait", move || {
        default_.fetch_add(1, Ordering::SeqCst);
    });
    wait.call();

    assert_eq!(1, configured.load(Ordering::SeqCst));
    assert_eq!(0, default.load(Ordering::SeqCst));
}

#[test]
fn test_single_shot_runs_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_ = calls.clone();
    let wait = Options::new().single_shot("RunWait", move || {
        calls_.fetch_add(1, Ordering::SeqCst);
    });

    assert!(!wait.has_run());
    wait.call();
    wait.call();
    wait.call();

    assert!(wait.has_run());
    assert_eq!(1, calls.load(Ordering::SeqCst));
}

#[test]
fn test_wait_fn_ignores_other_value_types() {
    let options = Options::new()
        .with("RunWait", "forever")
        .with_wait_fn("OtherWait", || {});

    assert!(options.wait_fn("RunWait").is_none());
    assert!(options.wait_fn("Missing").is_none());
    assert!(options.wait_fn("OtherWait").is_some());
}
