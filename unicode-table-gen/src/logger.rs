//! A minimal stderr backend for the [`log`] facade.
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct StderrLogger {
    level: AtomicUsize,
}

impl StderrLogger {
    const fn new() -> Self {
        Self {
            level: AtomicUsize::new(LevelFilter::Off as usize),
        }
    }

    fn level(&self) -> LevelFilter {
        match self.level.load(Ordering::Relaxed) {
            x if x == LevelFilter::Error as usize => LevelFilter::Error,
            x if x == LevelFilter::Warn as usize => LevelFilter::Warn,
            x if x == LevelFilter::Info as usize => LevelFilter::Info,
            x if x == LevelFilter::Debug as usize => LevelFilter::Debug,
            x if x == LevelFilter::Trace as usize => LevelFilter::Trace,
            _ => LevelFilter::Off,
        }
    }

    fn set_level(&self, level: LevelFilter) {
        self.level.store(level as usize, Ordering::Relaxed);
        log::set_max_level(level);
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}", format_record(record.level(), &record.args().to_string()));
    }

    fn flush(&self) {}
}

fn format_record(level: Level, message: &str) -> String {
    format!("[{}][{level}] {message}", env!("CARGO_PKG_NAME"))
}

static LOGGER: StderrLogger = StderrLogger::new();

fn is_installed() -> bool {
    let current = log::logger() as *const dyn Log;
    current.cast::<()>() == (&LOGGER as *const StderrLogger).cast::<()>()
}

/// Installs the stderr logger at `level`.
///
/// Can be called more than once to change the level. Fails if another logger
/// was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    // `set_logger` only succeeds once; later or racing calls see our logger installed
    if let Err(e) = log::set_logger(&LOGGER) {
        if !is_installed() {
            return Err(e);
        }
    }
    LOGGER.set_level(level);
    Ok(())
}
