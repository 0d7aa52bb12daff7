//! Rolling Logger
//!
//! A `log` backend that keeps the most recent records in a circular buffer
//! and echoes each record to the browser console (stderr off-wasm).

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// One captured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<5} {} {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Logger holding at most `capacity` lines; oldest lines are evicted first
pub struct RollingLogger {
    capacity: usize,
    lines: Mutex<VecDeque<LogLine>>,
    echo: bool,
}

impl RollingLogger {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
            echo: true,
        }
    }

    /// Buffer only, no console output
    pub fn silent(capacity: usize) -> Self {
        Self { echo: false, ..Self::new(capacity) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, line: LogLine) {
        if self.echo {
            echo(&line);
        }
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Buffered lines, oldest first
    pub fn snapshot(&self) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.push(LogLine {
            timestamp: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn echo(line: &LogLine) {
    let text = wasm_bindgen::JsValue::from_str(&line.to_string());
    match line.level {
        Level::Error => web_sys::console::error_1(&text),
        Level::Warn => web_sys::console::warn_1(&text),
        Level::Info => web_sys::console::info_1(&text),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&text),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn echo(line: &LogLine) {
    eprintln!("{}", line);
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the global rolling logger.
///
/// The capacity of the first call wins; later calls only fail with
/// `SetLoggerError` because a logger is already installed.
pub fn init(capacity: usize, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent records captured by the global logger
pub fn recent() -> Vec<LogLine> {
    LOGGER.get().map(RollingLogger::snapshot).unwrap_or_default()
}
