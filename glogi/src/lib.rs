//! Colored, fixed-width leveled console logging.
//!
//! Every line has the same shape:
//!
//! ```text
//! [2025/12/26 15:04:05] WARN  [db.rs:88            ] slow query elapsed=500ms
//! ```
//!
//! The crate is split into:
//!
//! - **Pure rendering** ([`level`], [`color`], [`config`], [`record`],
//!   [`format`]): severity scale, color resolution, configuration snapshots and
//!   the line formatter. No I/O.
//! - **Output** ([`sink`], [`handler`], [`logger`]): handlers write rendered
//!   lines to a serialized sink; [`Logger`] is the call surface over a handler.
//! - **Process-wide facade** ([`global`], macros, [`compat`]): one logger per
//!   process, initialized once from `LOG_*` environment variables (see
//!   [`settings`]), plus `log`-package style calls.
//! - **[`tracing_bridge`]**: renders `tracing` events in the same format.
//!
//! ```no_run
//! fn main() -> std::io::Result<()> {
//!     glogi::init();
//!     glogi::info!("server started", "port" => 8080)?;
//!     glogi::printf!("{} workers ready", 4)?;
//!     Ok(())
//! }
//! ```

pub mod color;
pub mod compat;
pub mod config;
pub mod format;
pub mod global;
pub mod handler;
pub mod level;
pub mod logger;
mod macros;
pub mod record;
pub mod settings;
pub mod sink;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tracing_bridge;
pub mod value;

pub use color::{ColorCode, resolve as resolve_color};
pub use config::{ColorSlot, Config, ConfigStore, Palette};
pub use global::{
    Builder, Global, debug, disable_colors, enable_colors, enabled, error, fatal, global, info,
    init, is_initialized, log, panic, recover, set_color_debug, set_color_error, set_color_info,
    set_color_source, set_color_trace, set_color_warn, set_level, set_min_level,
    set_source_width, trace, warn, with,
};
pub use handler::{ColoredHandler, Handler};
pub use level::{Level, LevelVar};
pub use logger::{Aborted, FATAL_EXIT_CODE, Logger};
pub use record::{CallSite, Record};
pub use settings::{Settings, load_settings};
pub use sink::Sink;
pub use value::{Attr, Value};
