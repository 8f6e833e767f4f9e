//! Leveled logging macros over the global logger.
//!
//! ```ignore
//! glogi::info!("server started", "port" => 8080)?;
//! glogi::warn!("slow query", "elapsed" => Duration::from_millis(500))?;
//! ```
//!
//! Attributes are only built when the level passes the floor. Each macro
//! evaluates to `std::io::Result<()>`.

/// Log at an explicit [`Level`](crate::Level).
#[macro_export]
macro_rules! log {
    ($level:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        let level: $crate::Level = $level;
        if $crate::enabled(level) {
            $crate::log(
                level,
                ::std::convert::AsRef::<str>::as_ref(&$message),
                &[$($crate::Attr::new($key, $value)),*],
            )
        } else {
            ::std::io::Result::Ok(())
        }
    }};
}

#[macro_export]
macro_rules! trace {
    ($($args:tt)+) => {
        $crate::log!($crate::Level::Trace, $($args)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($args:tt)+) => {
        $crate::log!($crate::Level::Debug, $($args)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($args:tt)+) => {
        $crate::log!($crate::Level::Info, $($args)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($args:tt)+) => {
        $crate::log!($crate::Level::Warn, $($args)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($args:tt)+) => {
        $crate::log!($crate::Level::Error, $($args)+)
    };
}

/// Log at FATAL and exit with status 1.
#[macro_export]
macro_rules! fatal {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::fatal(
            ::std::convert::AsRef::<str>::as_ref(&$message),
            &[$($crate::Attr::new($key, $value)),*],
        )
    };
}

/// Log at PANIC and evaluate to the [`Aborted`](crate::Aborted) signal.
#[macro_export]
macro_rules! panic_log {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::panic(
            ::std::convert::AsRef::<str>::as_ref(&$message),
            &[$($crate::Attr::new($key, $value)),*],
        )
    };
}
