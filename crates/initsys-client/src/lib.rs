macro_rules! regex {
    ($name:ident, $re:literal $(,)?) => {
        static $name: std::sync::LazyLock<regex::Regex> =
            std::sync::LazyLock::new(|| regex::Regex::new($re).unwrap());
    };
}

mod backend;
pub use backend::*;
mod detect;
mod environment;
pub use environment::*;
mod host;
pub use host::*;
pub mod keys;
mod manager;
pub use manager::*;
mod platform;
pub use platform::*;
pub mod status;
pub mod template;
#[cfg(test)]
mod test_util;

pub use initsys_core::{Error, Result, ServiceDescriptor, Status};

/// Probes the running host and returns the backend for this platform.
///
/// Call once during process start and keep the returned [`Backend`].
pub fn select_backend() -> Result<Backend> {
    Registry::for_current_platform().select(&SystemEnvironment, Host::system())
}
