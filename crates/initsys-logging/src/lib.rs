mod logger_builder;
mod syslog;

pub use logger_builder::*;
pub use syslog::SyslogMakeWriter;
pub use {time, tracing_subscriber};
