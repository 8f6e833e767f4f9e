//! Logging handle over a [`Handler`].
//!
//! Every entry point is `#[track_caller]`, so the call-site recorded is the
//! code that called into this crate, however many `#[track_caller]` layers
//! (macros, the compat shim, the global facade) sit in between.

use std::any::Any;
use std::backtrace::Backtrace;
use std::io;
use std::panic::{self, AssertUnwindSafe, Location};
use std::process;
use std::sync::Arc;

use thiserror::Error;

use crate::handler::Handler;
use crate::level::Level;
use crate::record::{CallSite, Record};
use crate::value::Attr;

/// Exit status used after a FATAL record.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Signal produced by a PANIC-level call.
///
/// The record has already been written when this value exists. The caller
/// either returns it as an error or calls [`Aborted::raise`] to unwind; a
/// [`Logger::recover`] scope handles both.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Aborted {
    message: String,
    origin: CallSite,
    stack: String,
    write_error: Option<Arc<io::Error>>,
}

impl Aborted {
    fn new(message: &str, origin: &Location<'_>, write_error: Option<io::Error>) -> Self {
        Self {
            message: message.to_string(),
            origin: CallSite::from(origin),
            stack: capture_stack(),
            write_error: write_error.map(Arc::new),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the PANIC-level call was made.
    pub fn origin(&self) -> &CallSite {
        &self.origin
    }

    /// Stack captured when the PANIC-level call was made, on one line.
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Set when the PANIC record could not be written to the sink.
    pub fn write_error(&self) -> Option<&io::Error> {
        self.write_error.as_deref()
    }

    /// Unwind with `self` as the payload.
    ///
    /// Does not run the panic hook; the record was already written.
    pub fn raise(self) -> ! {
        panic::resume_unwind(Box::new(self))
    }
}

#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

impl Logger {
    pub fn new(handler: impl Handler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Derive a logger that appends `attrs` to every record.
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        Logger {
            handler: self.handler.with_attrs(attrs.into_iter().collect()),
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Log at `level`. Below the floor this returns without building a record.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, attrs: &[Attr]) -> io::Result<()> {
        self.log_at(level, message, attrs, Location::caller())
    }

    pub(crate) fn log_at(
        &self,
        level: Level,
        message: &str,
        attrs: &[Attr],
        location: &Location<'_>,
    ) -> io::Result<()> {
        if !self.handler.enabled(level) {
            return Ok(());
        }
        let record = Record::new(level, message)
            .with_call_site(location)
            .with_attrs(attrs.iter().cloned());
        self.handler.handle(&record)
    }

    #[track_caller]
    pub fn trace(&self, message: &str, attrs: &[Attr]) -> io::Result<()> {
        self.log_at(Level::Trace, message, attrs, Location::caller())
    }

    #[track_caller]
    pub fn debug(&self, message: &str, attrs: &[Attr]) -> io::Result<()> {
        self.log_at(Level::Debug, message, attrs, Location::caller())
    }

    #[track_caller]
    pub fn info(&self, message: &str, attrs: &[Attr]) -> io::Result<()> {
        self.log_at(Level::Info, message, attrs, Location::caller())
    }

    #[track_caller]
    pub fn warn(&self, message: &str, attrs: &[Attr]) -> io::Result<()> {
        self.log_at(Level::Warn, message, attrs, Location::caller())
    }

    #[track_caller]
    pub fn error(&self, message: &str, attrs: &[Attr]) -> io::Result<()> {
        self.log_at(Level::Error, message, attrs, Location::caller())
    }

    /// Log at FATAL and exit the process with [`FATAL_EXIT_CODE`].
    ///
    /// The exit happens after the write attempt, whether or not it succeeded.
    #[track_caller]
    pub fn fatal(&self, message: &str, attrs: &[Attr]) -> ! {
        let _ = self.log_at(Level::Fatal, message, attrs, Location::caller());
        process::exit(FATAL_EXIT_CODE)
    }

    /// Log at PANIC and hand back the abort signal.
    ///
    /// A failed write is kept in [`Aborted::write_error`].
    #[track_caller]
    pub fn panic(&self, message: &str, attrs: &[Attr]) -> Aborted {
        let location = Location::caller();
        let written = self.log_at(Level::Panic, message, attrs, location);
        Aborted::new(message, location, written.err())
    }

    /// Run `scope`, turning an abort into a logged PANIC record.
    ///
    /// Both an `Err(Aborted)` return and an unwinding panic (any payload) are
    /// caught, written as `recovered: <message>` with a `stack` attribute, and
    /// reported as `Ok(None)`. Execution continues after the scope. An error
    /// means the recovery record itself could not be written.
    #[track_caller]
    pub fn recover<T>(
        &self,
        scope: impl FnOnce() -> Result<T, Aborted>,
    ) -> io::Result<Option<T>> {
        let location = Location::caller();
        let (message, stack) = match panic::catch_unwind(AssertUnwindSafe(scope)) {
            Ok(Ok(value)) => return Ok(Some(value)),
            Ok(Err(aborted)) => (aborted.message, aborted.stack),
            Err(payload) => match payload.downcast::<Aborted>() {
                Ok(aborted) => {
                    let aborted = *aborted;
                    (aborted.message, aborted.stack)
                }
                Err(payload) => (payload_message(payload.as_ref()), capture_stack()),
            },
        };
        self.log_at(
            Level::Panic,
            &format!("recovered: {message}"),
            &[Attr::new("stack", stack)],
            location,
        )?;
        Ok(None)
    }
}

/// Current stack as a single line, frames separated by ` | `.
fn capture_stack() -> String {
    Backtrace::force_capture()
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
