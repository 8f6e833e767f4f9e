//! Severity scale and the shared minimum-level gate.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity of a log record.
///
/// The order is fixed: `Trace < Debug < Info < Warn < Error < Fatal < Panic`.
/// A record is rendered when its level is at or above the configured floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    Panic = 6,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Upper-case name without padding.
    pub fn name(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Panic => "PANIC",
        }
    }

    /// Parse a floor setting.
    ///
    /// Accepts `TRACE`, `DEBUG`, `WARN`/`WARNING` and `ERROR` in any case;
    /// everything else (including `FATAL`, `PANIC` and garbage) maps to `Info`.
    pub fn from_setting(value: &str) -> Level {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Level::Trace,
            "DEBUG" => Level::Debug,
            "WARN" | "WARNING" => Level::Warn,
            "ERROR" => Level::Error,
            _ => Level::Info,
        }
    }

    fn from_u8(raw: u8) -> Level {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            3 => Level::Warn,
            4 => Level::Error,
            5 => Level::Fatal,
            6 => Level::Panic,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// Minimum level shared between the global facade and every handler derived from it.
///
/// Readers see the last stored value; there is no ordering with other state.
#[derive(Debug)]
pub struct LevelVar(AtomicU8);

impl LevelVar {
    pub fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub fn get(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a record at `level` passes the floor.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.get()
    }
}

impl Default for LevelVar {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}
