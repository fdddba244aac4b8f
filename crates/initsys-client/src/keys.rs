//! Option keys understood by the backends, with their defaults.

pub const USER_SERVICE: &str = "UserService";
pub const USER_SERVICE_DEFAULT: bool = false;

pub const SYSTEMD_SCRIPT: &str = "SystemdScript";
pub const SYSV_SCRIPT: &str = "SysvScript";
pub const RCS_SCRIPT: &str = "RCSScript";
pub const LAUNCHD_CONFIG: &str = "LaunchdConfig";

pub const RELOAD_SIGNAL: &str = "ReloadSignal";
pub const PID_FILE: &str = "PIDFile";

/// Negative values leave the limit out of the unit.
pub const LIMIT_NOFILE: &str = "LimitNOFILE";
pub const LIMIT_NOFILE_DEFAULT: i64 = -1;

pub const RESTART: &str = "Restart";
pub const RESTART_DEFAULT: &str = "always";

pub const SUCCESS_EXIT_STATUS: &str = "SuccessExitStatus";

pub const LOG_OUTPUT: &str = "LogOutput";
pub const LOG_OUTPUT_DEFAULT: bool = false;

pub const LOG_DIRECTORY: &str = "LogDirectory";
pub const LOG_DIRECTORY_DEFAULT: &str = "/var/log";

pub const RESTART_SEC: &str = "RestartSec";
pub const RESTART_SEC_DEFAULT: i64 = 120;

pub const KEEP_ALIVE: &str = "KeepAlive";
pub const KEEP_ALIVE_DEFAULT: bool = true;

pub const RUN_AT_LOAD: &str = "RunAtLoad";
pub const RUN_AT_LOAD_DEFAULT: bool = false;

pub const SESSION_CREATE: &str = "SessionCreate";
pub const SESSION_CREATE_DEFAULT: bool = false;

pub const PREFIX: &str = "Prefix";
pub const PREFIX_DEFAULT: &str = "application";

pub const RUN_WAIT: &str = "RunWait";

pub const RESTART_RESPAWN_THRESHOLD: &str = "RestartRespawnThreshold";
pub const RESTART_RESPAWN_THRESHOLD_DEFAULT: i64 = 300;

pub const RESTART_RESPAWN_TIMEOUT: &str = "RestartRespawnTimeout";
pub const RESTART_RESPAWN_TIMEOUT_DEFAULT: i64 = 5;

pub const RESTART_RETRY: &str = "RestartRetry";
pub const RESTART_RETRY_DEFAULT: i64 = 10;

/// Fail the install when a runlevel link cannot be created instead of skipping it.
pub const SYSV_STRICT_SYMLINKS: &str = "SysvStrictSymlinks";
pub const SYSV_STRICT_SYMLINKS_DEFAULT: bool = false;
