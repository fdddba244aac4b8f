use std::io::Write;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use super::*;

#[test]
fn maps_levels_to_priorities() {
    assert_eq!(libc::LOG_ERR, priority(&Level::ERROR));
    assert_eq!(libc::LOG_WARNING, priority(&Level::WARN));
    assert_eq!(libc::LOG_INFO, priority(&Level::INFO));
    assert_eq!(libc::LOG_DEBUG, priority(&Level::DEBUG));
    assert_eq!(libc::LOG_DEBUG, priority(&Level::TRACE));
}

#[test]
fn writes_whole_buffer() {
    let make_writer = SyslogMakeWriter::new("initsys-test", None);
    let mut writer = make_writer.make_writer();
    let written = writer.write(b"hello from the test suite\n").unwrap();
    assert_eq!(26, written);
    writer.flush().unwrap();
}

#[test]
fn reports_interior_nul() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let make_writer = SyslogMakeWriter::new("initsys-test", Some(tx));
    let mut writer = make_writer.make_writer();
    writer.write_all(b"bad\0message").unwrap();
    assert!(matches!(rx.try_recv(), Ok(LoggingError::Syslog(_))));
}
