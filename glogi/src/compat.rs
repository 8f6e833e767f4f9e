//! Calls shaped like a classic `log` package: `print`, `printf`, `fatal`, `panic`.
//!
//! Print-style calls log at INFO with no level control. Fatal-style calls log
//! at FATAL and exit with status 1. Panic-style calls log at PANIC and then
//! unwind with an [`Aborted`](crate::Aborted) payload, which a
//! [`recover`](crate::recover) scope turns back into a logged record.
//!
//! Everything here sits one `#[track_caller]` layer above the global facade;
//! the reported call-site is still the code calling into this module.

use std::fmt::{self, Display};
use std::io;
use std::process;

use crate::global::global;
use crate::level::Level;
use crate::logger::FATAL_EXIT_CODE;

#[track_caller]
fn log_compat(level: Level, message: impl Display) -> io::Result<()> {
    let logger = global().logger();
    if !logger.enabled(level) {
        return Ok(());
    }
    logger.log(level, &message.to_string(), &[])
}

/// Log `value` at INFO.
#[track_caller]
pub fn print(value: impl Display) -> io::Result<()> {
    log_compat(Level::Info, value)
}

/// Log `value` at INFO; a trailing newline is dropped, since every record is one line.
#[track_caller]
pub fn println(value: impl Display) -> io::Result<()> {
    let message = value.to_string();
    log_compat(Level::Info, message.trim_end_matches(['\r', '\n']))
}

/// Log preformatted arguments at INFO. See [`printf!`](crate::printf).
#[track_caller]
pub fn printf(args: fmt::Arguments<'_>) -> io::Result<()> {
    log_compat(Level::Info, args)
}

/// Log `value` at FATAL and exit with status 1.
#[track_caller]
pub fn fatal(value: impl Display) -> ! {
    let _ = log_compat(Level::Fatal, value);
    process::exit(FATAL_EXIT_CODE)
}

#[track_caller]
pub fn fatalln(value: impl Display) -> ! {
    fatal(value)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    fatal(args)
}

/// Log `value` at PANIC and unwind.
#[track_caller]
pub fn panic(value: impl Display) -> ! {
    global().logger().panic(&value.to_string(), &[]).raise()
}

#[track_caller]
pub fn panicln(value: impl Display) -> ! {
    panic(value)
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    panic(args)
}

/// Format and log at INFO.
#[macro_export]
macro_rules! printf {
    ($($arg:tt)+) => {
        $crate::compat::printf(::std::format_args!($($arg)+))
    };
}

/// Format, log at FATAL and exit with status 1.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::compat::fatalf(::std::format_args!($($arg)+))
    };
}

/// Format, log at PANIC and unwind.
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::compat::panicf(::std::format_args!($($arg)+))
    };
}
