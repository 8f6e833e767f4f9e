//! Render `tracing` events in the glogi line format.
//!
//! # Separation of Concerns
//!
//! - **glogi calls** (`glogi::info!`, [`crate::Logger`]): the crate's own
//!   handler pipeline, including FATAL and PANIC.
//! - **`tracing` events (this module)**: events from dependencies or code that
//!   already uses `tracing`. They share the global floor, configuration and
//!   sink, so both streams look identical on the console.
//!
//! Span context is not rendered; only the event's own fields are.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt as tracing_fmt};

use crate::config::ConfigStore;
use crate::format::render;
use crate::global::global;
use crate::level::{Level, LevelVar};
use crate::record::{CallSite, Record};
use crate::sink::Sink;
use crate::value::{Attr, Value};

/// `FormatEvent` producing the same line as [`crate::format::render`].
#[derive(Debug, Clone)]
pub struct GlogiFormat {
    config: Arc<ConfigStore>,
}

impl GlogiFormat {
    pub fn new(config: Arc<ConfigStore>) -> Self {
        Self { config }
    }
}

impl<S, N> FormatEvent<S, N> for GlogiFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let record = record_from_event(event);
        writer.write_str(&render(&record, &[], &self.config.snapshot()))
    }
}

/// Convert a `tracing` event into a [`Record`].
pub fn record_from_event(event: &Event<'_>) -> Record {
    let metadata = event.metadata();
    let mut visitor = EventVisitor::default();
    event.record(&mut visitor);
    let mut record = Record::new(Level::from(*metadata.level()), visitor.message);
    record.call_site = metadata
        .file()
        .zip(metadata.line())
        .map(|(file, line)| CallSite::new(file, line));
    record.attrs = visitor.attrs;
    record
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    attrs: Vec<Attr>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.attrs.push(Attr::new(field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Value::Str(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::Uint(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::Float(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        self.push(field, Value::error(value));
    }
}

/// A fmt layer writing glogi lines to `sink`, gated by `level`.
pub fn layer<S>(
    config: Arc<ConfigStore>,
    level: Arc<LevelVar>,
    sink: Sink,
) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_fmt::layer()
        .event_format(GlogiFormat::new(config))
        .with_writer(sink)
        .with_filter(filter_fn(move |metadata| {
            level.enabled(Level::from(*metadata.level()))
        }))
}

/// Install a global `tracing` subscriber that renders through the global glogi logger.
///
/// Reads `RUST_LOG`; falls back to `default_filter` if unset or invalid.
///
/// # Example
/// ```bash
/// RUST_LOG=my_app=debug LOG_LEVEL=debug cargo run
/// ```
pub fn init(default_filter: &str) -> Result<(), TryInitError> {
    let global = global();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer(
            Arc::clone(global.config()),
            Arc::clone(global.level_var()),
            global.sink().clone(),
        ))
        .try_init()
}
