//! The process-wide logger.
//!
//! One [`Global`] exists per process. It is built at most once: explicitly
//! through [`init`] / [`Builder::init`], or implicitly by the first logging
//! call. Concurrent first calls race on a [`OnceLock`], so exactly one
//! configuration wins and the others observe it.

use std::io;
use std::sync::{Arc, OnceLock};

use crate::config::ConfigStore;
use crate::handler::ColoredHandler;
use crate::level::{Level, LevelVar};
use crate::logger::{Aborted, Logger};
use crate::settings::Settings;
use crate::sink::Sink;
use crate::value::Attr;

static GLOBAL: OnceLock<Global> = OnceLock::new();

/// Floor, configuration, sink and root logger shared by the whole process.
#[derive(Debug)]
pub struct Global {
    level: Arc<LevelVar>,
    config: Arc<ConfigStore>,
    sink: Sink,
    logger: Logger,
}

impl Global {
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn level_var(&self) -> &Arc<LevelVar> {
        &self.level
    }

    pub fn level(&self) -> Level {
        self.level.get()
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    /// Replace the floor by name; unknown names mean `Info`.
    pub fn set_level(&self, name: &str) {
        self.level.set(Level::from_setting(name));
    }

    pub fn set_min_level(&self, level: Level) {
        self.level.set(level);
    }
}

/// Assembles a [`Global`].
#[derive(Debug, Default)]
pub struct Builder {
    settings: Settings,
    sink: Option<Sink>,
}

impl Builder {
    /// A builder with no external settings; output goes to stdout.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder seeded from `LOG_*` environment variables.
    pub fn from_env() -> Self {
        Self::new().settings(Settings::from_env())
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build a standalone instance without touching the process-wide one.
    pub fn build(self) -> Global {
        let level = Arc::new(LevelVar::new(self.settings.level()));
        let config = Arc::new(ConfigStore::default());
        config.load(&self.settings);
        let sink = self.sink.unwrap_or_default();
        let handler = ColoredHandler::new(sink.clone(), Arc::clone(&level), Arc::clone(&config));
        Global {
            level,
            config,
            sink,
            logger: Logger::new(handler),
        }
    }

    /// Install as the process-wide logger.
    ///
    /// Returns `true` if this call performed the initialization, `false` if
    /// another one already had (in which case `self` is discarded).
    pub fn init(self) -> bool {
        let mut performed = false;
        GLOBAL.get_or_init(|| {
            performed = true;
            self.build()
        });
        performed
    }
}

/// Initialize from the environment unless already initialized.
pub fn init() -> &'static Global {
    GLOBAL.get_or_init(|| Builder::from_env().build())
}

/// The process-wide logger, initializing it on first use.
pub fn global() -> &'static Global {
    init()
}

pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

pub fn enabled(level: Level) -> bool {
    global().enabled(level)
}

pub fn set_level(name: &str) {
    global().set_level(name);
}

pub fn set_min_level(level: Level) {
    global().set_min_level(level);
}

pub fn set_source_width(width: usize) {
    global().config().set_source_width(width);
}

pub fn set_color_trace(color: &str) {
    global().config().set_color_trace(color);
}

pub fn set_color_debug(color: &str) {
    global().config().set_color_debug(color);
}

pub fn set_color_info(color: &str) {
    global().config().set_color_info(color);
}

pub fn set_color_warn(color: &str) {
    global().config().set_color_warn(color);
}

pub fn set_color_error(color: &str) {
    global().config().set_color_error(color);
}

pub fn set_color_source(color: &str) {
    global().config().set_color_source(color);
}

pub fn disable_colors() {
    global().config().disable_colors();
}

pub fn enable_colors() {
    global().config().enable_colors();
}

/// Derive a logger from the global one with `attrs` bound to it.
pub fn with(attrs: impl IntoIterator<Item = Attr>) -> Logger {
    global().logger().with(attrs)
}

#[track_caller]
pub fn log(level: Level, message: &str, attrs: &[Attr]) -> io::Result<()> {
    global().logger().log(level, message, attrs)
}

#[track_caller]
pub fn trace(message: &str, attrs: &[Attr]) -> io::Result<()> {
    global().logger().trace(message, attrs)
}

#[track_caller]
pub fn debug(message: &str, attrs: &[Attr]) -> io::Result<()> {
    global().logger().debug(message, attrs)
}

#[track_caller]
pub fn info(message: &str, attrs: &[Attr]) -> io::Result<()> {
    global().logger().info(message, attrs)
}

#[track_caller]
pub fn warn(message: &str, attrs: &[Attr]) -> io::Result<()> {
    global().logger().warn(message, attrs)
}

#[track_caller]
pub fn error(message: &str, attrs: &[Attr]) -> io::Result<()> {
    global().logger().error(message, attrs)
}

/// Log at FATAL and exit with status 1.
#[track_caller]
pub fn fatal(message: &str, attrs: &[Attr]) -> ! {
    global().logger().fatal(message, attrs)
}

/// Log at PANIC and return the abort signal; see [`Aborted`].
#[track_caller]
pub fn panic(message: &str, attrs: &[Attr]) -> Aborted {
    global().logger().panic(message, attrs)
}

/// Recovery scope over the global logger; see [`Logger::recover`].
#[track_caller]
pub fn recover<T>(scope: impl FnOnce() -> Result<T, Aborted>) -> io::Result<Option<T>> {
    global().logger().recover(scope)
}
