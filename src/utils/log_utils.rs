//! Logging utilities for the application

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Normal execution, no verbose flag
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Logger for application messages
#[derive(Debug, Clone, Default)]
pub struct Logger {
    /// Current verbosity level
    verbosity: u8,
    /// Suppress everything except warnings
    quiet: bool,
}

impl Logger {
    /// Create a new logger with the specified verbosity
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            quiet: false,
        }
    }

    /// Create a logger that only emits warnings
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            verbosity: 0,
            quiet: true,
        }
    }

    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Whether a message at `level` would be printed
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        !self.quiet && self.verbosity >= level as u8
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: LogLevel) {
        if self.enabled(level) {
            match level {
                LogLevel::Normal => println!("{msg}"),
                LogLevel::Info => println!("info: {msg}"),
                LogLevel::Debug => println!("dbg: {msg}"),
            }
        }
    }

    /// Log at normal level (displayed unless quiet)
    pub fn normal(&self, msg: &str) {
        self.log(msg, LogLevel::Normal);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }

    /// Warnings go to stderr even when quiet
    pub fn warn(&self, msg: &str) {
        eprintln!("warn: {msg}");
    }
}
