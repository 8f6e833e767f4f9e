//! External settings: environment variables and an optional TOML file.
//!
//! Settings are raw, user-supplied values. Nothing here fails on bad input:
//! an unparsable width or an empty color is simply treated as unset, and
//! [`Settings::apply`] falls back to the existing configuration for it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::resolve;
use crate::config::Config;
use crate::level::Level;

pub const ENV_LEVEL: &str = "LOG_LEVEL";
pub const ENV_SOURCE_WIDTH: &str = "LOG_SOURCE_WIDTH";
pub const ENV_NO_COLOR: &str = "LOG_NO_COLOR";
pub const ENV_COLOR_TRACE: &str = "LOG_COLOR_TRACE";
pub const ENV_COLOR_DEBUG: &str = "LOG_COLOR_DEBUG";
pub const ENV_COLOR_INFO: &str = "LOG_COLOR_INFO";
pub const ENV_COLOR_WARN: &str = "LOG_COLOR_WARN";
pub const ENV_COLOR_ERROR: &str = "LOG_COLOR_ERROR";
pub const ENV_COLOR_SOURCE: &str = "LOG_COLOR_SOURCE";

/// Logger settings (TOML or environment).
///
/// ```toml
/// level = "debug"
/// source_width = 24
/// no_color = false
///
/// [colors]
/// info = "white"
/// source = "off"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Minimum level name; see [`Level::from_setting`].
    pub level: Option<String>,
    /// Call-site column width; non-positive values are ignored.
    pub source_width: Option<i64>,
    pub no_color: Option<bool>,
    pub colors: ColorSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColorSettings {
    pub trace: Option<String>,
    pub debug: Option<String>,
    pub info: Option<String>,
    pub warn: Option<String>,
    pub error: Option<String>,
    pub source: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup (environment-shaped keys).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            level: get(ENV_LEVEL),
            source_width: get(ENV_SOURCE_WIDTH).and_then(|w| w.trim().parse().ok()),
            no_color: get(ENV_NO_COLOR).and_then(|v| parse_flag(&v)),
            colors: ColorSettings {
                trace: get(ENV_COLOR_TRACE),
                debug: get(ENV_COLOR_DEBUG),
                info: get(ENV_COLOR_INFO),
                warn: get(ENV_COLOR_WARN),
                error: get(ENV_COLOR_ERROR),
                source: get(ENV_COLOR_SOURCE),
            },
        }
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            level: overrides.level.or(self.level),
            source_width: overrides.source_width.or(self.source_width),
            no_color: overrides.no_color.or(self.no_color),
            colors: ColorSettings {
                trace: overrides.colors.trace.or(self.colors.trace),
                debug: overrides.colors.debug.or(self.colors.debug),
                info: overrides.colors.info.or(self.colors.info),
                warn: overrides.colors.warn.or(self.colors.warn),
                error: overrides.colors.error.or(self.colors.error),
                source: overrides.colors.source.or(self.colors.source),
            },
        }
    }

    /// Floor named by these settings (`Info` when unset).
    pub fn level(&self) -> Level {
        Level::from_setting(self.level.as_deref().unwrap_or_default())
    }

    /// Apply every set value to `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(width) = self.source_width.filter(|w| *w > 0) {
            config.source_width = usize::try_from(width).unwrap_or(config.source_width);
        }
        if let Some(disabled) = self.no_color {
            config.colors_disabled = disabled;
        }
        let palette = &mut config.palette;
        let colors = &self.colors;
        for (slot, value) in [
            (&mut palette.trace, &colors.trace),
            (&mut palette.debug, &colors.debug),
            (&mut palette.info, &colors.info),
            (&mut palette.warn, &colors.warn),
            (&mut palette.error, &colors.error),
            (&mut palette.source, &colors.source),
        ] {
            if let Some(value) = value {
                *slot = resolve(value);
            }
        }
    }
}

/// `1`/`true` disable colors, `0`/`false` keep them; anything else is unset.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Load settings from a TOML file.
///
/// If the file is missing, returns `Settings::default()`.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(settings)
}
