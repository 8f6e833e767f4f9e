//! Rendering configuration and the process-wide configuration store.
//!
//! The store is loaded from [`Settings`] at most once, then adjusted through
//! setters. Every rendered line works from one immutable snapshot, so a
//! concurrent setter never produces a half-updated line.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;

use crate::color::{ColorCode, resolve};
use crate::level::Level;
use crate::settings::Settings;

/// Default width of the call-site column.
pub const DEFAULT_SOURCE_WIDTH: usize = 20;

/// One color per rendered element. `error` also colors FATAL and PANIC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub trace: ColorCode,
    pub debug: ColorCode,
    pub info: ColorCode,
    pub warn: ColorCode,
    pub error: ColorCode,
    pub source: ColorCode,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            trace: ColorCode::DARK_GRAY,
            debug: ColorCode::CYAN,
            info: ColorCode::NONE,
            warn: ColorCode::YELLOW,
            error: ColorCode::RED,
            source: ColorCode::GREEN,
        }
    }
}

impl Palette {
    pub fn for_level(&self, level: Level) -> &ColorCode {
        match level {
            Level::Trace => &self.trace,
            Level::Debug => &self.debug,
            Level::Info => &self.info,
            Level::Warn => &self.warn,
            Level::Error | Level::Fatal | Level::Panic => &self.error,
        }
    }

    pub fn slot_mut(&mut self, slot: ColorSlot) -> &mut ColorCode {
        match slot {
            ColorSlot::Trace => &mut self.trace,
            ColorSlot::Debug => &mut self.debug,
            ColorSlot::Info => &mut self.info,
            ColorSlot::Warn => &mut self.warn,
            ColorSlot::Error => &mut self.error,
            ColorSlot::Source => &mut self.source,
        }
    }
}

/// Configurable element of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Source,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Width of the call-site column; always > 0.
    pub source_width: usize,
    pub palette: Palette,
    /// Suppresses every color regardless of the palette.
    pub colors_disabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_width: DEFAULT_SOURCE_WIDTH,
            palette: Palette::default(),
            colors_disabled: false,
        }
    }
}

impl Config {
    pub fn colors_enabled(&self) -> bool {
        !self.colors_disabled
    }
}

/// Shared, swappable [`Config`].
#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwap<Config>,
    loaded: AtomicBool,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
            loaded: AtomicBool::new(false),
        }
    }

    /// Current configuration. Stays valid even if a setter runs afterwards.
    pub fn snapshot(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// Apply external settings on top of the current configuration.
    ///
    /// Only the first call has an effect; it returns `true`. Later calls return
    /// `false` and leave the configuration untouched.
    pub fn load(&self, settings: &Settings) -> bool {
        if self.loaded.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.update(|config| settings.apply(config));
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Set the call-site column width. Zero is ignored.
    pub fn set_source_width(&self, width: usize) {
        if width == 0 {
            return;
        }
        self.update(|config| config.source_width = width);
    }

    /// Resolve `color` and assign it to `slot`.
    pub fn set_color(&self, slot: ColorSlot, color: &str) {
        let code = resolve(color);
        self.update(|config| *config.palette.slot_mut(slot) = code.clone());
    }

    pub fn set_color_trace(&self, color: &str) {
        self.set_color(ColorSlot::Trace, color);
    }

    pub fn set_color_debug(&self, color: &str) {
        self.set_color(ColorSlot::Debug, color);
    }

    pub fn set_color_info(&self, color: &str) {
        self.set_color(ColorSlot::Info, color);
    }

    pub fn set_color_warn(&self, color: &str) {
        self.set_color(ColorSlot::Warn, color);
    }

    pub fn set_color_error(&self, color: &str) {
        self.set_color(ColorSlot::Error, color);
    }

    pub fn set_color_source(&self, color: &str) {
        self.set_color(ColorSlot::Source, color);
    }

    pub fn disable_colors(&self) {
        self.update(|config| config.colors_disabled = true);
    }

    pub fn enable_colors(&self) {
        self.update(|config| config.colors_disabled = false);
    }

    fn update(&self, apply: impl Fn(&mut Config)) {
        self.current.rcu(|current| {
            let mut next = Config::clone(current);
            apply(&mut next);
            next
        });
    }
}
