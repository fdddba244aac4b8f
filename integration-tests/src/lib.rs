use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use initsys::client::{Backend, BackendKind, Host, Manager};
use initsys::core::process::{CommandOutput, CommandRunner, command_line};
use initsys::core::{Error, Result, ServiceDescriptor};
use tempfile::TempDir;
use tracing::debug;

const SYSTEM_UNIT_DIR: &str = "/etc/systemd/system";
const USER_UNIT_DIR: &str = "/home/tester/.config/systemd/user";
const HOME_DIR: &str = "/home/tester";

/// Stands in for the native tools of one init system, backed by the artifacts found
/// under a scratch root.
#[derive(Clone, Debug)]
pub struct SimulatedInit {
    kind: BackendKind,
    root: PathBuf,
    state: Arc<Mutex<InitState>>,
}

#[derive(Debug, Default)]
struct InitState {
    running: BTreeSet<String>,
    enabled: BTreeSet<String>,
    history: Vec<String>,
}

fn ok(stdout: impl Into<String>) -> Result<CommandOutput> {
    Ok(CommandOutput::new(0, stdout))
}

fn exit(code: i32, stdout: impl Into<String>) -> Result<CommandOutput> {
    Ok(CommandOutput::new(code, stdout))
}

impl SimulatedInit {
    pub fn new(kind: BackendKind, root: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            root: root.into(),
            state: Arc::default(),
        }
    }

    /// Every command line run so far, in order.
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.lock().running.contains(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.lock().enabled.contains(name)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InitState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn path(&self, absolute: &str) -> PathBuf {
        self.root.join(absolute.trim_start_matches('/'))
    }

    fn set_running(&self, name: &str, running: bool) {
        let mut state = self.lock();
        if running {
            state.running.insert(name.to_owned());
        } else {
            state.running.remove(name);
        }
    }

    /// systemd acts on any unit whose file is present, enabled or not.
    fn unit_file_exists(&self, unit: &str) -> bool {
        !unit.is_empty()
            && [SYSTEM_UNIT_DIR, USER_UNIT_DIR]
                .iter()
                .any(|dir| self.path(dir).join(unit).is_file())
    }

    fn systemctl(&self, args: &[&str]) -> Result<CommandOutput> {
        let args: Vec<&str> = args.iter().copied().filter(|a| *a != "--user").collect();
        let unit = args.last().copied().unwrap_or_default();
        let name = unit.trim_end_matches(".service");
        let known = self.unit_file_exists(unit);
        let state = if self.is_enabled(name) { "enabled" } else { "disabled" };
        match args.first().copied() {
            Some("--version") => ok("systemd 252 (252.22-1)\n+PAM +AUDIT +SELINUX\n"),
            Some("daemon-reload") => ok(""),
            Some("enable") => {
                self.lock().enabled.insert(name.to_owned());
                ok("")
            }
            Some("disable") => {
                self.lock().enabled.remove(name);
                ok("")
            }
            Some("start" | "restart") if known => {
                self.set_running(name, true);
                ok("")
            }
            Some("stop") if known => {
                self.set_running(name, false);
                ok("")
            }
            Some("start" | "restart" | "stop") => {
                exit(5, format!("Failed to {} {unit}: Unit {unit} not found.\n", args[0]))
            }
            Some("is-active") if self.is_running(name) => ok("active\n"),
            Some("is-active") => exit(3, "inactive\n"),
            Some("list-unit-files") if known => ok(format!(
                "UNIT FILE STATE PRESET\n{unit} {state} enabled\n\n1 unit files listed.\n"
            )),
            Some("list-unit-files") => exit(1, "UNIT FILE STATE PRESET\n\n0 unit files listed.\n"),
            _ => exit(1, "Unknown command verb.\n"),
        }
    }

    fn service(&self, args: &[&str]) -> Result<CommandOutput> {
        let [name, action] = args else {
            return exit(1, "Usage: service < option > | --status-all | [ service_name [ command | --full-restart ] ]\n");
        };
        let script = match self.kind {
            BackendKind::FreeBsd => self.path("/usr/local/etc/rc.d").join(name),
            _ => self.path("/etc/init.d").join(name),
        };
        if !script.exists() {
            return exit(1, format!("{name}: unrecognized service\n"));
        }
        match (*action, self.kind) {
            ("start" | "restart", _) => {
                self.set_running(name, true);
                ok(format!("Starting {name}\n"))
            }
            ("stop", _) => {
                self.set_running(name, false);
                ok(format!("Stopping {name}\n"))
            }
            ("status", BackendKind::FreeBsd) if self.is_running(name) => {
                ok(format!("{name} is running as pid 4242.\n"))
            }
            ("status", BackendKind::FreeBsd) => exit(1, format!("{name} is not running.\n")),
            ("status", _) if self.is_running(name) => ok("Running\n"),
            ("status", _) => exit(3, "Stopped\n"),
            _ => exit(1, format!("Usage: {name} {{start|stop|restart|status}}\n")),
        }
    }

    fn init_script(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let script = Path::new(program);
        if !script.exists() {
            return Err(Error::CommandSpawn {
                command: command_line(program, args),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        let name = script
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let procd = self.kind == BackendKind::Procd;
        match args.first().copied() {
            Some("start" | "restart") => {
                self.set_running(&name, true);
                ok("")
            }
            Some("stop") => {
                self.set_running(&name, false);
                ok("")
            }
            Some("enable") if procd => {
                self.lock().enabled.insert(name);
                ok("")
            }
            Some("disable") if procd => {
                for link in ["S50", "K02"] {
                    std::fs::remove_file(self.path("/etc/rc.d").join(format!("{link}{name}"))).ok();
                }
                self.lock().enabled.remove(&name);
                ok("")
            }
            Some("status") => match (procd, self.is_running(&name)) {
                (true, true) => ok("running\n"),
                (true, false) => exit(3, "inactive\n"),
                (false, true) => ok("Running\n"),
                (false, false) => exit(1, "Stopped\n"),
            },
            _ => exit(1, format!("Usage: {program} {{start|stop|restart|status}}\n")),
        }
    }

    /// Splits `svc:/<prefix>/<name>:default` into the manifest path and the service name.
    fn manifest(&self, fmri: &str) -> Option<(PathBuf, String)> {
        let service = fmri.strip_prefix("svc:/")?.strip_suffix(":default")?;
        let (prefix, name) = service.rsplit_once('/')?;
        let path = self
            .path("/lib/svc/manifest")
            .join(prefix)
            .join(format!("{name}.xml"));
        path.exists().then(|| (path, name.to_owned()))
    }

    fn svcadm(&self, args: &[&str]) -> Result<CommandOutput> {
        match args {
            ["restart", "manifest-import"] => ok(""),
            [action @ ("enable" | "disable"), fmri] => match self.manifest(fmri) {
                Some((_, name)) => {
                    self.set_running(&name, *action == "enable");
                    ok("")
                }
                None => exit(1, format!("svcadm: Pattern '{fmri}' doesn't match any instances\n")),
            },
            _ => exit(2, "Usage: svcadm [-v] [cmd [args ... ]]\n"),
        }
    }

    fn svcs(&self, args: &[&str]) -> Result<CommandOutput> {
        let fmri = args.first().copied().unwrap_or_default();
        match self.manifest(fmri) {
            Some((_, name)) => {
                let state = if self.is_running(&name) { "online" } else { "disabled" };
                ok(format!("STATE          STIME    FMRI\n{state:<14} 10:15:02 {fmri}\n"))
            }
            None => exit(1, format!("svcs: Pattern '{fmri}' doesn't match any instances\n")),
        }
    }

    fn launchctl(&self, args: &[&str]) -> Result<CommandOutput> {
        match args {
            [action @ ("load" | "unload"), path] => {
                let path = Path::new(path);
                if !path.exists() {
                    return exit(1, format!("{}: No such file or directory\n", path.display()));
                }
                let name = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.set_running(&name, *action == "load");
                ok("")
            }
            ["list", name] if self.is_running(name) => ok(format!(
                "{{\n\t\"LimitLoadToSessionType\" = \"System\";\n\t\"Label\" = \"{name}\";\n\t\"PID\" = 4242;\n}};\n"
            )),
            ["list", name] => exit(
                113,
                format!("Could not find service \"{name}\" in domain for port\n"),
            ),
            _ => exit(1, "Unrecognized subcommand.\n"),
        }
    }
}

impl CommandRunner for SimulatedInit {
    fn run_with_output(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        debug!("Simulating {command}");
        self.lock().history.push(command);
        match program {
            "systemctl" => self.systemctl(args),
            "service" => self.service(args),
            "svcadm" => self.svcadm(args),
            "svcs" => self.svcs(args),
            "launchctl" => self.launchctl(args),
            _ if program.contains("/init.d/") => self.init_script(program, args),
            _ => Err(Error::CommandSpawn {
                command: command_line(program, args),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }
}

/// A scratch root with the directories each backend expects to exist.
pub struct TestHost {
    root: TempDir,
    init: SimulatedInit,
    kind: BackendKind,
}

impl TestHost {
    pub fn new(kind: BackendKind) -> io::Result<Self> {
        let root = tempfile::tempdir()?;
        for dir in ["/etc/rc.d", "/etc/init.d", HOME_DIR] {
            std::fs::create_dir_all(root.path().join(dir.trim_start_matches('/')))?;
        }
        for level in 0..=6 {
            std::fs::create_dir_all(root.path().join(format!("etc/rc{level}.d")))?;
        }
        let init = SimulatedInit::new(kind, root.path());
        Ok(Self { root, init, kind })
    }

    pub fn init(&self) -> &SimulatedInit {
        &self.init
    }

    pub fn path(&self, absolute: &str) -> PathBuf {
        self.root.path().join(absolute.trim_start_matches('/'))
    }

    pub fn host(&self) -> Host {
        Host::system()
            .with_root(self.root.path())
            .with_home(self.path(HOME_DIR))
            .with_runner(self.init.clone())
    }

    pub fn backend(&self) -> Backend {
        Backend::new(self.kind, false, self.host())
    }

    pub fn manager(&self, descriptor: ServiceDescriptor) -> Box<dyn Manager> {
        self.backend().new_service(descriptor)
    }
}

pub fn descriptor(name: &str) -> ServiceDescriptor {
    ServiceDescriptor::builder(name)
        .with_display_name("Integration <Test> Service")
        .with_description("Exercises the full lifecycle")
        .with_executable("/usr/local/bin/integration-service")
        .with_args(["--port", "8080"])
        .with_environment_variable("RUST_LOG", "info")
        .build()
}
