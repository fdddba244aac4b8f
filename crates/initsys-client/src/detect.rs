use std::path::Path;

use crate::Environment;

regex!(INITTAB_RCS_RE, r"::sysinit:.*rcS");

pub(crate) fn is_systemd(env: &dyn Environment) -> bool {
    if env.path_exists(Path::new("/run/systemd/system")) {
        return true;
    }
    if env.which("systemctl").is_none() {
        return false;
    }
    env.read_to_string(Path::new("/proc/1/comm"))
        .map(|comm| comm.trim_matches([' ', '\r', '\n']) == "systemd")
        .unwrap_or(false)
}

pub(crate) fn is_procd(env: &dyn Environment) -> bool {
    env.which("procd").is_some()
}

pub(crate) fn is_rcs(env: &dyn Environment) -> bool {
    if !env.path_exists(Path::new("/etc/init.d/rcS")) {
        return false;
    }
    // Hosts with a `service` wrapper are handled as SysV
    if env.which("service").is_some() {
        return false;
    }
    env.read_to_string(Path::new("/etc/inittab"))
        .map(|inittab| INITTAB_RCS_RE.is_match(&inittab))
        .unwrap_or(false)
}

fn is_in_container(env: &dyn Environment) -> bool {
    env.read_to_string(Path::new("/proc/1/cgroup"))
        .map(|cgroup| cgroup.contains("docker") || cgroup.contains("lxc"))
        .unwrap_or(false)
}

pub(crate) fn linux_interactive(env: &dyn Environment) -> bool {
    if is_in_container(env) {
        return true;
    }
    let ppid = env.parent_pid();
    if ppid == 1 {
        return false;
    }
    match env.read_link(&Path::new("/proc").join(ppid.to_string()).join("exe")) {
        Some(parent) => parent != Path::new("/sbin/procd"),
        None => true,
    }
}

pub(crate) fn freebsd_interactive(env: &dyn Environment) -> bool {
    env.var("IS_DAEMON").as_deref() != Some("1")
}

pub(crate) fn parent_is_not_init(env: &dyn Environment) -> bool {
    env.parent_pid() != 1
}

#[cfg(test)]
#[path = "./detect_test.rs"]
mod detect_test;
