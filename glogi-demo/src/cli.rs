//! Command implementations.

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use glogi::{Attr, Builder, Settings, load_settings};

/// Settings given as command-line flags; these win over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub level: Option<String>,
    pub no_color: bool,
    pub source_width: Option<i64>,
}

impl Overrides {
    fn into_settings(self) -> Settings {
        Settings {
            level: self.level,
            source_width: self.source_width,
            no_color: self.no_color.then_some(true),
            ..Settings::default()
        }
    }
}

/// Install the global logger from file, environment and flags (in increasing priority).
pub fn init_logging(config: Option<&Path>, overrides: Overrides) -> Result<()> {
    let file = match config {
        Some(path) if !path.exists() => bail!("config {} not found", path.display()),
        Some(path) => load_settings(path).context("load logger settings")?,
        None => Settings::default(),
    };
    let settings = file
        .merge(Settings::from_env())
        .merge(overrides.into_settings());
    Builder::new().settings(settings).init();
    Ok(())
}

pub fn tour() -> Result<()> {
    glogi::trace!("trace message", "key" => "value")?;
    glogi::debug!("debug info", "user_id" => 123)?;
    glogi::info!("server started", "port" => 8080)?;
    glogi::warn!("slow query", "duration" => Duration::from_millis(500))?;

    let err = io::Error::other("connection timeout");
    glogi::error!("database error", "err" => err)?;

    glogi::compat::println("This is a println message")?;
    glogi::printf!("Formatted message: {}", 42)?;

    glogi::info!("all tests passed")?;
    Ok(())
}

pub fn info(message: &str, attrs: &[String]) -> Result<()> {
    let attrs = attrs
        .iter()
        .map(|pair| parse_attr(pair))
        .collect::<Result<Vec<_>>>()?;
    glogi::info(message, &attrs)?;
    Ok(())
}

fn parse_attr(pair: &str) -> Result<Attr> {
    let Some((key, value)) = pair.split_once('=') else {
        bail!("attribute {pair:?} is not KEY=VALUE");
    };
    if key.is_empty() {
        bail!("attribute {pair:?} has an empty key");
    }
    Ok(Attr::new(key, value))
}

pub fn fatal(message: &str, compat: bool) -> Result<()> {
    if compat {
        glogi::fatalf!("{message}")
    }
    glogi::fatal!(message)
}

pub fn panic(message: &str, raise: bool) -> Result<()> {
    let outcome: Option<()> = glogi::recover(|| {
        let aborted = glogi::panic_log!(message);
        if raise { aborted.raise() } else { Err(aborted) }
    })?;
    glogi::info!("resumed after recovery", "recovered" => outcome.is_none())?;
    Ok(())
}

pub fn tracing_events() -> Result<()> {
    glogi::tracing_bridge::init("trace").context("install tracing subscriber")?;
    tracing::debug!(user_id = 123, "debug info");
    tracing::info!(port = 8080, "server started");
    tracing::warn!(elapsed_ms = 500_u64, "slow query");
    Ok(())
}
