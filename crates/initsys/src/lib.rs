pub use initsys_core as core;

#[cfg(feature = "client")]
pub use initsys_client as client;

#[cfg(feature = "config")]
pub use initsys_config as config;

#[cfg(feature = "logging")]
pub use initsys_logging as logging;

#[cfg(feature = "server")]
pub use initsys_server as server;
