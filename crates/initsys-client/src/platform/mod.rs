mod common;
mod freebsd;
pub use freebsd::*;
mod launchd;
pub use launchd::*;
mod procd;
pub use procd::*;
mod rcs;
pub use rcs::*;
mod solaris;
pub use solaris::*;
mod systemd;
pub use systemd::*;
mod sysv;
pub use sysv::*;

pub use common::QUIESCENT_DELAY;
