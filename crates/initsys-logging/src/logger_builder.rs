use std::io;
use std::sync::OnceLock;

use crossbeam_channel::Sender;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;
use tracing::metadata::LevelFilter;
use tracing::{Level, Subscriber};
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::SyslogMakeWriter;

static LOCAL_TIME: OnceLock<Result<OffsetTime<Rfc3339>, time::error::IndeterminateOffset>> =
    OnceLock::new();

// The local offset can only be read safely before other threads exist
#[ctor::ctor]
fn init_time() {
    LOCAL_TIME.set(OffsetTime::local_rfc_3339()).ok();
}

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum LoggerCreationError {
    #[error("Invalid log filter directive: {0}")]
    InvalidDirective(#[from] ParseError),
    #[error("Error installing the global logger: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Sink failures reported after the logger was built.
#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
    #[error("Journald is unavailable, logging to syslog instead: {0}")]
    JournaldUnavailable(#[source] io::Error),
    #[error("Error writing to syslog: {0}")]
    Syslog(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogTarget {
    /// Human-readable output on stderr.
    #[default]
    Console,
    /// journald on Linux, the unified log on macOS, syslog elsewhere.
    System,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

#[derive(Clone, Debug)]
pub struct LoggerBuilder {
    name: String,
    target: LogTarget,
    level: Level,
    timezone: Timezone,
    env_filter_directives: Vec<String>,
    errors: Option<Sender<LoggingError>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: LogTarget::Console,
            level: Level::INFO,
            timezone: Timezone::Local,
            env_filter_directives: vec![],
            errors: None,
        }
    }

    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Extra filter directive such as `my_crate=debug`, validated on build.
    pub fn with_env_filter_directive(mut self, directive: impl Into<String>) -> Self {
        self.env_filter_directives.push(directive.into());
        self
    }

    pub fn with_error_sender(mut self, errors: Sender<LoggingError>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> LogTarget {
        self.target
    }

    fn timer(&self) -> OffsetTime<Rfc3339> {
        match (self.timezone, LOCAL_TIME.get()) {
            (Timezone::Local, Some(Ok(offset))) => offset.clone(),
            _ => OffsetTime::new(UtcOffset::UTC, Rfc3339),
        }
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggerCreationError> {
        let mut env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .from_env_lossy();
        for directive in &self.env_filter_directives {
            env_filter = env_filter.add_directive(directive.parse::<Directive>()?);
        }
        Ok(env_filter)
    }

    fn report(&self, error: LoggingError) {
        if let Some(errors) = &self.errors {
            errors.try_send(error).ok();
        }
    }

    fn console_layer(&self) -> BoxedLayer {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_timer(self.timer())
            .with_thread_names(true)
            .with_writer(io::stderr)
            .boxed()
    }

    #[cfg_attr(target_os = "macos", allow(dead_code))]
    fn syslog_layer(&self) -> BoxedLayer {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .with_writer(SyslogMakeWriter::new(&self.name, self.errors.clone()))
            .boxed()
    }

    #[cfg(target_os = "linux")]
    fn system_layer(&self) -> BoxedLayer {
        match tracing_journald::layer() {
            Ok(layer) => layer.with_syslog_identifier(self.name.clone()).boxed(),
            Err(e) => {
                self.report(LoggingError::JournaldUnavailable(e));
                self.syslog_layer()
            }
        }
    }

    #[cfg(target_os = "macos")]
    fn system_layer(&self) -> BoxedLayer {
        tracing_oslog::OsLogger::new(&self.name, "default").boxed()
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn system_layer(&self) -> BoxedLayer {
        self.syslog_layer()
    }

    pub fn build(
        self,
    ) -> Result<impl SubscriberInitExt + Subscriber + for<'a> LookupSpan<'a>, LoggerCreationError>
    {
        let env_filter = self.env_filter()?;
        let layer = match self.target {
            LogTarget::Console => self.console_layer(),
            LogTarget::System => self.system_layer(),
        };
        Ok(tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .with(tracing_error::ErrorLayer::default()))
    }

    /// Builds the subscriber and installs it as the global default.
    pub fn init(self) -> Result<(), LoggerCreationError> {
        self.build()?.try_init()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "./logger_builder_test.rs"]
mod logger_builder_test;
