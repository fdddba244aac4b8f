//! Classifiers turning native status output into a [`Status`].
//!
//! Each function is pure over the captured output. Adapters run the query and pass the
//! result in; anything needing a second query takes it as a closure.

use initsys_core::process::CommandOutput;
use initsys_core::{Error, Result, Status};
use regex::Regex;

regex!(LAUNCHD_PID_RE, r#""PID" = ([0-9]+);"#);
regex!(SYSTEMD_VERSION_RE, r"systemd ([0-9]+)");

/// First systemd release able to write stdout/stderr straight to a file.
pub const SYSTEMD_OUTPUT_FILE_VERSION: u32 = 236;

/// Classifies `systemctl is-active`. `list_unit_files` runs only for `inactive` units.
pub fn interpret_systemd(
    output: &CommandOutput,
    unit_name: &str,
    list_unit_files: impl FnOnce() -> Result<String>,
) -> Result<Status> {
    let state = output.stdout.trim_start();
    if state.starts_with("active") || state.starts_with("activating") {
        Ok(Status::Running)
    } else if state.starts_with("inactive") {
        if list_unit_files()?.contains(unit_name) {
            Ok(Status::Stopped)
        } else {
            Err(Error::NotInstalled)
        }
    } else if state.starts_with("failed") {
        Err(Error::ServiceFailed(unit_name.to_owned()))
    } else {
        Err(Error::NotInstalled)
    }
}

pub fn systemd_has_output_file_support(version_output: &str) -> bool {
    SYSTEMD_VERSION_RE
        .captures(version_output)
        .and_then(|captures| captures[1].parse::<u32>().ok())
        .map(|version| version >= SYSTEMD_OUTPUT_FILE_VERSION)
        .unwrap_or(false)
}

/// Classifies the `status` action of the generated SysV and rcS scripts.
///
/// The scripts exit non-zero when stopped, so the exit code is not consulted.
pub fn interpret_init_script(output: &CommandOutput) -> Result<Status> {
    let state = output.stdout.trim_start();
    if state.starts_with("Running") {
        Ok(Status::Running)
    } else if state.starts_with("Stopped") {
        Ok(Status::Stopped)
    } else {
        Err(Error::NotInstalled)
    }
}

/// Exit code 3 is how procd reports a service that isn't running.
pub fn interpret_procd(output: &CommandOutput, command: &str) -> Result<Status> {
    if !matches!(output.exit_code, Some(0) | Some(3)) {
        return Err(Error::CommandFailed {
            command: command.to_owned(),
            exit_code: output.exit_code,
            output: output.stdout.trim().to_owned(),
        });
    }
    let state = output.stdout.trim_start();
    if state.starts_with("running") {
        Ok(Status::Running)
    } else if state.starts_with("inactive") {
        Ok(Status::Stopped)
    } else {
        Err(Error::NotInstalled)
    }
}

pub fn interpret_freebsd(
    installed: bool,
    output: &CommandOutput,
    command: &str,
) -> Result<Status> {
    if !installed {
        return Err(Error::NotInstalled);
    }
    match output.exit_code {
        Some(0) => Ok(Status::Running),
        Some(1) => Ok(Status::Stopped),
        exit_code => Err(Error::CommandFailed {
            command: command.to_owned(),
            exit_code,
            output: output.stdout.trim().to_owned(),
        }),
    }
}

/// Classifies `svcs <fmri>`. Output without a recognizable state line is `Unknown`.
pub fn interpret_solaris(output: &CommandOutput, fmri: &str) -> Result<Status> {
    if !output.success() {
        return Err(Error::NotInstalled);
    }
    let state_re = Regex::new(&format!(
        r"(degraded|disabled|legacy_run|maintenance|offline|online)\s+\S+\s+{}",
        regex::escape(fmri)
    ))
    .map_err(|e| Error::Unsupported(format!("Invalid service identifier {fmri}: {e}")))?;

    match state_re.captures(&output.stdout) {
        Some(captures) if &captures[1] == "online" => Ok(Status::Running),
        Some(_) => Ok(Status::Stopped),
        None => Ok(Status::Unknown),
    }
}

/// Classifies `launchctl list <label>`. A loaded job with a pid is running.
pub fn interpret_launchd(output: &CommandOutput, installed: bool) -> Result<Status> {
    if output.success() && LAUNCHD_PID_RE.is_match(&output.stdout) {
        Ok(Status::Running)
    } else if installed {
        Ok(Status::Stopped)
    } else {
        Err(Error::NotInstalled)
    }
}

#[cfg(test)]
#[path = "./status_test.rs"]
mod status_test;
