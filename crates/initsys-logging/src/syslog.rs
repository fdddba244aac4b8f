use std::ffi::CString;
use std::io;
use std::sync::OnceLock;

use crossbeam_channel::Sender;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

use crate::LoggingError;

// openlog keeps the pointer, so the identifier must outlive every later syslog call
static IDENT: OnceLock<CString> = OnceLock::new();

/// Writes each formatted event as one message to the local syslog daemon.
#[derive(Clone, Debug)]
pub struct SyslogMakeWriter {
    errors: Option<Sender<LoggingError>>,
}

impl SyslogMakeWriter {
    pub fn new(name: &str, errors: Option<Sender<LoggingError>>) -> Self {
        let ident = IDENT.get_or_init(|| {
            CString::new(name.replace('\0', "")).unwrap_or_default()
        });
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_PID, libc::LOG_DAEMON);
        }
        Self { errors }
    }
}

pub(crate) fn priority(level: &Level) -> libc::c_int {
    match *level {
        Level::ERROR => libc::LOG_ERR,
        Level::WARN => libc::LOG_WARNING,
        Level::INFO => libc::LOG_INFO,
        Level::DEBUG | Level::TRACE => libc::LOG_DEBUG,
    }
}

impl<'a> MakeWriter<'a> for SyslogMakeWriter {
    type Writer = SyslogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SyslogWriter {
            priority: libc::LOG_INFO,
            errors: self.errors.clone(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        SyslogWriter {
            priority: priority(meta.level()),
            errors: self.errors.clone(),
        }
    }
}

#[derive(Debug)]
pub struct SyslogWriter {
    priority: libc::c_int,
    errors: Option<Sender<LoggingError>>,
}

impl SyslogWriter {
    fn report(&self, error: LoggingError) {
        if let Some(errors) = &self.errors {
            // Nobody listening is fine
            errors.try_send(error).ok();
        }
    }
}

impl io::Write for SyslogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let message = String::from_utf8_lossy(buf);
        match CString::new(message.trim_end().as_bytes()) {
            Ok(message) => unsafe {
                libc::syslog(self.priority, c"%s".as_ptr(), message.as_ptr());
            },
            Err(e) => self.report(LoggingError::Syslog(e.to_string())),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "./syslog_test.rs"]
mod syslog_test;
