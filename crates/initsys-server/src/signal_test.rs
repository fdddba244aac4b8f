use signal_hook::consts::{SIGKILL, SIGUSR1};
use signal_hook::low_level::raise;

use super::TerminationSignals;

#[test]
fn test_forbidden_signal_fails_to_register() {
    assert!(TerminationSignals::for_signals(&[SIGKILL]).is_err());
}

#[test]
fn test_wait_returns_after_registered_signal() {
    let signals = TerminationSignals::for_signals(&[SIGUSR1]).unwrap();
    raise(SIGUSR1).unwrap();
    signals.wait();
}
