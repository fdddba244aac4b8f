use std::fs::{self, OpenOptions, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use initsys_core::{Error, Result, ServiceDescriptor};
use tap::TapFallible;
use tracing::{debug, info, warn};

use crate::template::{self, Context, TemplateSource};
use crate::{BackendKind, Manager, keys};

/// Pause between stop and start on backends without an atomic restart.
pub const QUIESCENT_DELAY: Duration = Duration::from_millis(50);

pub(crate) const SCRIPT_MODE: u32 = 0o755;
pub(crate) const CONFIG_MODE: u32 = 0o644;

pub(crate) fn is_user_service(descriptor: &ServiceDescriptor) -> bool {
    descriptor
        .options()
        .bool(keys::USER_SERVICE, keys::USER_SERVICE_DEFAULT)
}

pub(crate) fn require_system_scope(kind: BackendKind, descriptor: &ServiceDescriptor) -> Result<()> {
    if is_user_service(descriptor) && !kind.supports_user_scope() {
        return Err(Error::Unsupported(format!(
            "{kind} does not support user services"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_not_installed(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::AlreadyInstalled(path.to_path_buf()));
    }
    Ok(())
}

pub(crate) fn ensure_installed(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::NotInstalled);
    }
    Ok(())
}

pub(crate) fn render(
    descriptor: &ServiceDescriptor,
    template_key: &str,
    builtin: &'static str,
    context: Context,
) -> Result<String> {
    let source = TemplateSource::from_options(descriptor.options(), template_key, builtin);
    if let TemplateSource::Override(_) = source {
        debug!("Using template override from {template_key}");
    }
    Ok(template::render(&source, &context)?)
}

/// Writes a new artifact. Never replaces an existing file.
pub(crate) fn write_artifact(path: &Path, contents: &str, mode: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::filesystem("creating", parent))?;
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(mode)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                Error::AlreadyInstalled(path.to_path_buf())
            } else {
                Error::filesystem("creating", path)(e)
            }
        })?;
    file.write_all(contents.as_bytes())
        .map_err(Error::filesystem("writing", path))?;
    // The mode passed to open is filtered by the umask
    fs::set_permissions(path, Permissions::from_mode(mode))
        .map_err(Error::filesystem("setting permissions on", path))?;
    info!("Wrote {path:?}");
    Ok(())
}

pub(crate) fn remove_artifact(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::NotInstalled
        } else {
            Error::filesystem("removing", path)(e)
        }
    })?;
    info!("Removed {path:?}");
    Ok(())
}

pub(crate) fn create_link(link: &Path, target: &Path) -> Result<()> {
    symlink(target, link).map_err(Error::filesystem("linking", link))
}

/// Creates every link, logging and skipping failures unless `strict` is set.
pub(crate) fn create_links(links: &[PathBuf], target: &Path, strict: bool) -> Result<()> {
    for link in links {
        match create_link(link, target) {
            Ok(()) => debug!("Linked {link:?} -> {target:?}"),
            Err(e) if !strict => warn!("Skipping runlevel link: {e}"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

pub(crate) fn remove_links(links: &[PathBuf]) -> Result<()> {
    for link in links {
        match fs::remove_file(link) {
            Ok(()) => debug!("Removed link {link:?}"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::filesystem("removing", link)(e)),
        }
    }
    Ok(())
}

/// Links in init-script directories point back at `../init.d/<name>`.
pub(crate) fn init_script_target(name: &str) -> PathBuf {
    Path::new("../init.d").join(name)
}

pub(crate) fn stop_best_effort(manager: &dyn Manager) {
    manager
        .stop()
        .tap_err(|e| debug!("Ignoring stop failure while uninstalling: {e}"))
        .ok();
}

pub(crate) fn restart_with_delay(manager: &dyn Manager) -> Result<()> {
    manager.stop()?;
    thread::sleep(QUIESCENT_DELAY);
    manager.start()
}
