use tracing::Level;

use super::*;

#[test]
fn defaults_to_console() {
    let builder = LoggerBuilder::new("demo");
    assert_eq!("demo", builder.name());
    assert_eq!(LogTarget::Console, builder.target());
}

#[test]
fn builds_console_subscriber() {
    let subscriber = LoggerBuilder::new("demo")
        .with_level(Level::DEBUG)
        .with_timezone(Timezone::Utc)
        .build()
        .unwrap();
    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!("console output");
    });
}

#[test]
fn accepts_filter_directives() {
    let builder = LoggerBuilder::new("demo").with_env_filter_directive("initsys_client=trace");
    assert!(builder.build().is_ok());
}

#[test]
fn rejects_invalid_directive() {
    let result = LoggerBuilder::new("demo")
        .with_env_filter_directive("demo=notalevel")
        .build();
    assert!(matches!(
        result,
        Err(LoggerCreationError::InvalidDirective(_))
    ));
}

#[test]
fn builds_system_subscriber() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let subscriber = LoggerBuilder::new("demo")
        .with_target(LogTarget::System)
        .with_error_sender(tx)
        .build()
        .unwrap();
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("system output");
    });
    // Journald may be missing in a container, which must only be reported
    for error in rx.try_iter() {
        assert!(matches!(
            error,
            LoggingError::JournaldUnavailable(_) | LoggingError::Syslog(_)
        ));
    }
}
