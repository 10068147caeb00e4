use crate::config::{LogFormat, LogLevels, LoggingConfig};
use crate::logging::{EventLog, Severity, default_directive, init};
use std::io;
use std::sync::{Arc, Mutex, Once};
use tempfile::tempdir;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// Use this to ensure init is only called once across all tests
static INIT: Once = Once::new();

#[test]
fn test_init_console_logging() {
    INIT.call_once(|| {
        assert!(init(LogFormat::Compact, Some("debug")).is_ok());
    });
    // A second initialization leaves the first subscriber in place
    assert!(init(LogFormat::Json, None).is_ok());
}

#[test]
fn test_invalid_filter_directive() {
    assert!(init(LogFormat::Compact, Some("tiny_webhook=notalevel")).is_err());
}

#[test]
fn test_disabled_levels_are_dropped() {
    let log = EventLog::with_levels(LogLevels {
        critical: false,
        errors: true,
        warnings: false,
        debug: false,
        info: true,
    });

    log.debug("hidden");
    log.warning("hidden");
    log.info("shown");
    log.error("shown");
    // critical cannot be switched off
    log.critical("shown");

    assert_eq!(
        log.recent(10),
        vec!["[CRI] shown", "[ERR] shown", "[INF] shown"]
    );
    assert!(log.is_enabled(Severity::Critical));
    assert!(!log.is_enabled(Severity::Debug));
}

#[test]
fn test_recent_is_most_recent_first() {
    let log = EventLog::with_levels(LogLevels::all());
    for i in 1..=5 {
        log.info(format!("message {}", i));
    }

    assert_eq!(log.len(), 5);
    assert_eq!(log.recent(2), vec!["[INF] message 5", "[INF] message 4"]);
    assert_eq!(log.recent(100).len(), 5);
    assert!(log.recent(0).is_empty());
}

#[test]
fn test_clones_share_the_buffer() {
    let log = EventLog::with_levels(LogLevels::all());
    let other = log.clone();

    other.warning("from clone");
    assert_eq!(log.recent(1), vec!["[WAR] from clone"]);
}

#[test]
fn test_concurrent_appends_are_all_kept() {
    let log = EventLog::with_levels(LogLevels::all());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let log = log.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    log.info(format!("thread {} line {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(log.len(), 400);
    // Per-thread order is preserved
    let thread_zero: Vec<_> = log
        .recent(400)
        .into_iter()
        .rev()
        .filter(|line| line.starts_with("[INF] thread 0 "))
        .collect();
    let expected: Vec<_> = (0..50).map(|i| format!("[INF] thread 0 line {}", i)).collect();
    assert_eq!(thread_zero, expected);
}

#[test]
fn test_file_sink_receives_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logs").join("tiny-webhook.log");

    let config = LoggingConfig {
        levels: LogLevels::all(),
        file: Some(path.clone()),
        ..LoggingConfig::default()
    };
    let log = EventLog::new(&config).unwrap();
    log.info("first");
    log.error("second");
    // Dropping the last handle flushes the writer
    drop(log);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "[INF] first\n[ERR] second\n");
}

#[test]
fn test_severity_names() {
    let prefixes: Vec<_> = Severity::ALL.iter().map(|s| s.prefix()).collect();
    assert_eq!(prefixes, vec!["[CRI]", "[ERR]", "[WAR]", "[DBG]", "[INF]"]);
    assert_eq!(Severity::Warning.to_string(), "warnings");
}

/// Console writer that keeps everything in memory
#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_default_directive_follows_levels() {
    let debug = EnvFilter::try_new(default_directive(&LogLevels::all())).unwrap();
    assert_eq!(debug.max_level_hint(), Some(LevelFilter::DEBUG));

    let quiet = EnvFilter::try_new(default_directive(&LogLevels::default())).unwrap();
    assert_eq!(quiet.max_level_hint(), Some(LevelFilter::INFO));
}

#[test]
fn test_debug_lines_reach_the_console() {
    let levels = LogLevels::all();
    let output = CapturedOutput::default();
    let writer = output.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_directive(&levels)))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let log = EventLog::with_levels(levels);
    tracing::subscriber::with_default(subscriber, || {
        log.info("Webhook request: (No message)");
        log.debug("Testing hook \"push\"");
    });

    let console = output.contents();
    assert!(console.contains("Webhook request: (No message)"), "{}", console);
    assert!(console.contains("Testing hook \"push\""), "{}", console);
    assert_eq!(log.len(), 2);
}

#[test]
fn test_debug_lines_stay_off_the_console_when_disabled() {
    let levels = LogLevels::default();
    let output = CapturedOutput::default();
    let writer = output.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_directive(&levels)))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let log = EventLog::with_levels(LogLevels::all());
    tracing::subscriber::with_default(subscriber, || {
        log.debug("Testing hook \"push\"");
    });

    assert!(!output.contents().contains("Testing hook"));
}
